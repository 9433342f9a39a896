// src/lib.rs

//! Dependency-graph task runner.
//!
//! Register named vertices and the edges between them on a [`Runner`], then
//! call [`Runner::run`]. Independent vertices run concurrently, each vertex
//! starts only after all of its dependencies succeeded, and everything
//! downstream of a failure is skipped. The first failure is returned.
//!
//! ```no_run
//! # async fn demo() -> Result<(), dagrun::DagError> {
//! let mut runner = dagrun::Runner::new();
//! runner.add_vertex("fetch", || async { Ok(()) });
//! runner.add_vertex("build", || async { Ok(()) });
//! runner.add_edge("fetch", "build");
//! runner.run().await
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod exec;
pub mod logging;

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::loader::load_from_path;
use crate::config::model::GraphFile;

pub use crate::dag::Runner;
pub use crate::errors::DagError;

/// High-level entry point used by `main.rs`.
///
/// Loads the graph file, builds a [`Runner`] whose vertices are shell
/// commands, and either validates it (`--dry-run`) or runs it to completion.
pub async fn run(args: CliArgs) -> Result<()> {
    let path = PathBuf::from(&args.file);
    let graph = load_from_path(&path)?;
    let runner = Runner::from_config(&graph);

    if args.dry_run {
        runner.validate()?;
        print_dry_run(&graph);
        return Ok(());
    }

    runner.run().await?;
    Ok(())
}

/// Simple dry-run output: print vertices, their dependencies and commands.
fn print_dry_run(graph: &GraphFile) {
    println!("dagrun dry-run");
    println!("vertices ({}):", graph.vertex.len());
    for (name, vertex) in graph.vertex.iter() {
        println!("  - {name}");
        println!("      cmd: {}", vertex.cmd);
        if !vertex.after.is_empty() {
            println!("      after: {:?}", vertex.after);
        }
    }
    println!("graph is valid");

    debug!("dry-run complete (no execution)");
}
