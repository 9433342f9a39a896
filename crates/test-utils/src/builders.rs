#![allow(dead_code)]

use std::collections::BTreeMap;

use dagrun::config::{GraphFile, VertexConfig};

/// Builder for `GraphFile` to simplify test setup.
pub struct GraphFileBuilder {
    graph: GraphFile,
}

impl GraphFileBuilder {
    pub fn new() -> Self {
        Self {
            graph: GraphFile {
                vertex: BTreeMap::new(),
            },
        }
    }

    pub fn with_vertex(mut self, name: &str, vertex: VertexConfig) -> Self {
        self.graph.vertex.insert(name.to_string(), vertex);
        self
    }

    pub fn build(self) -> GraphFile {
        self.graph
    }
}

impl Default for GraphFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `VertexConfig`.
pub struct VertexConfigBuilder {
    vertex: VertexConfig,
}

impl VertexConfigBuilder {
    pub fn new(cmd: &str) -> Self {
        Self {
            vertex: VertexConfig::new(cmd),
        }
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.vertex.after.push(dep.to_string());
        self
    }

    pub fn build(self) -> VertexConfig {
        self.vertex
    }
}
