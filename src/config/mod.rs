// src/config/mod.rs

//! Graph files.
//!
//! - [`model`] is the TOML-backed data model.
//! - [`loader`] reads and parses it from disk or from a string.
//!
//! A parsed [`GraphFile`] is turned into a runnable graph with
//! [`crate::dag::Runner::from_config`].

pub mod loader;
pub mod model;

pub use loader::{DEFAULT_GRAPH_FILE, load_from_path, parse_str};
pub use model::{GraphFile, VertexConfig};
