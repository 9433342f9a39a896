// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Graph definition as read from a TOML file.
///
/// ```toml
/// [vertex.build]
/// cmd = "cargo build"
///
/// [vertex.test]
/// cmd = "cargo test"
/// after = ["build"]
/// ```
///
/// Nothing here is validated beyond TOML syntax and non-empty commands;
/// unknown `after` names and cycles are reported when the graph runs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphFile {
    /// All vertices from `[vertex.<name>]`, keyed by vertex name.
    #[serde(default)]
    pub vertex: BTreeMap<String, VertexConfig>,
}

/// `[vertex.<name>]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VertexConfig {
    /// Shell command to execute.
    pub cmd: String,

    /// Vertices that must succeed before this one starts.
    #[serde(default)]
    pub after: Vec<String>,
}

impl VertexConfig {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            after: Vec::new(),
        }
    }
}
