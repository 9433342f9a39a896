// src/exec/mod.rs

//! Process execution layer.
//!
//! Vertices defined in a graph file run shell commands. [`command`] spawns
//! them with `tokio::process::Command`, logs their output through `tracing`
//! and turns a non-zero exit into an error the runner propagates.

pub mod command;

pub use command::{CommandError, run_command, shell_command};
