// src/config/loader.rs

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::model::GraphFile;

/// Graph file used when `--file` is not given.
pub const DEFAULT_GRAPH_FILE: &str = "Dagrun.toml";

/// Load and parse a graph file from disk.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<GraphFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading graph file at {:?}", path))?;

    parse_str(&contents).with_context(|| format!("parsing graph file {:?}", path))
}

/// Parse a graph file from a TOML string.
///
/// Only syntax and per-vertex sanity are checked here. Graph-level checks
/// (unknown `after` references, cycles) belong to the runner.
pub fn parse_str(contents: &str) -> Result<GraphFile> {
    let graph: GraphFile = toml::from_str(contents)?;

    for (name, vertex) in graph.vertex.iter() {
        if vertex.cmd.trim().is_empty() {
            bail!("vertex '{name}' has an empty `cmd`");
        }
    }

    Ok(graph)
}

