// src/exec/command.rs

//! Shell-command vertex actions.

use std::process::Stdio;

use anyhow::{Context, Result};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Failure of a command that was spawned successfully but did not exit
/// cleanly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("command `{cmd}` for vertex '{vertex}' exited with status {code}")]
    NonZeroExit {
        vertex: String,
        cmd: String,
        code: i32,
    },

    #[error("command `{cmd}` for vertex '{vertex}' was terminated by a signal")]
    Terminated { vertex: String, cmd: String },
}

/// Build a shell command appropriate for the platform.
pub fn shell_command(cmd: &str) -> Command {
    if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    }
}

/// Run `cmd` for `vertex` and wait for it to exit.
///
/// stdout lines are logged at info, stderr lines at debug. A non-zero exit
/// becomes a [`CommandError`] wrapped in `anyhow::Error`, so callers can
/// `downcast_ref::<CommandError>()` on it.
pub async fn run_command(vertex: &str, cmd: &str) -> Result<()> {
    info!(vertex = %vertex, cmd = %cmd, "starting command");

    let mut child = shell_command(cmd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("spawning process for vertex '{vertex}'"))?;

    let mut readers = Vec::new();

    if let Some(stdout) = child.stdout.take() {
        let name = vertex.to_string();
        readers.push(tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                info!(vertex = %name, "stdout: {}", line);
            }
        }));
    }

    // Always consume stderr so the pipe buffer can't fill up.
    if let Some(stderr) = child.stderr.take() {
        let name = vertex.to_string();
        readers.push(tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(vertex = %name, "stderr: {}", line);
            }
        }));
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of vertex '{vertex}'"))?;

    for reader in readers {
        if let Err(e) = reader.await {
            warn!(vertex = %vertex, error = %e, "output reader task failed");
        }
    }

    info!(
        vertex = %vertex,
        exit_code = status.code(),
        success = status.success(),
        "command exited"
    );

    if status.success() {
        return Ok(());
    }

    let err = match status.code() {
        Some(code) => CommandError::NonZeroExit {
            vertex: vertex.to_string(),
            cmd: cmd.to_string(),
            code,
        },
        None => CommandError::Terminated {
            vertex: vertex.to_string(),
            cmd: cmd.to_string(),
        },
    };
    Err(err.into())
}
