// tests/cli_run.rs
#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::path::Path;

use clap::Parser;
use dagrun::cli::CliArgs;
use dagrun::config::DEFAULT_GRAPH_FILE;
use dagrun_test_utils::{init_tracing, with_timeout};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

fn args(file: &Path, dry_run: bool) -> CliArgs {
    CliArgs {
        file: file.display().to_string(),
        log_level: None,
        dry_run,
    }
}

fn write_graph(dir: &TempDir, contents: &str) -> std::io::Result<std::path::PathBuf> {
    let path = dir.path().join("Dagrun.toml");
    fs::write(&path, contents)?;
    Ok(path)
}

fn touch_graph(marker: &Path) -> String {
    format!(
        r#"
[vertex.prepare]
cmd = "true"

[vertex.touch]
cmd = "touch {}"
after = ["prepare"]
"#,
        marker.display()
    )
}

#[test]
fn file_defaults_to_dagrun_toml() -> TestResult {
    let parsed = CliArgs::try_parse_from(["dagrun"])?;
    assert_eq!(parsed.file, DEFAULT_GRAPH_FILE);
    assert!(!parsed.dry_run);
    assert!(parsed.log_level.is_none());
    Ok(())
}

#[tokio::test]
async fn dry_run_validates_without_executing() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let marker = dir.path().join("marker");
    let path = write_graph(&dir, &touch_graph(&marker))?;

    with_timeout(dagrun::run(args(&path, true))).await?;

    assert!(!marker.exists(), "dry run executed a command");
    Ok(())
}

#[tokio::test]
async fn run_executes_graph_file_commands() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let marker = dir.path().join("marker");
    let path = write_graph(&dir, &touch_graph(&marker))?;

    with_timeout(dagrun::run(args(&path, false))).await?;

    assert!(marker.exists());
    Ok(())
}

#[tokio::test]
async fn dry_run_rejects_a_cycle() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let path = write_graph(
        &dir,
        r#"
[vertex.a]
cmd = "true"
after = ["b"]

[vertex.b]
cmd = "true"
after = ["a"]
"#,
    )?;

    let err = with_timeout(dagrun::run(args(&path, true)))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("cycle"), "unexpected error: {err:#}");
    Ok(())
}

#[tokio::test]
async fn dry_run_rejects_unknown_after_reference() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let path = write_graph(
        &dir,
        r#"
[vertex.build]
cmd = "true"
after = ["fetch"]
"#,
    )?;

    let result = with_timeout(dagrun::run(args(&path, true))).await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn missing_graph_file_is_an_error() -> TestResult {
    let dir = TempDir::new()?;
    let result = dagrun::run(args(&dir.path().join("absent.toml"), true)).await;
    assert!(result.is_err());
    Ok(())
}
