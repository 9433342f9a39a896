// src/dag/graph.rs

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::errors::{DagError, Result};

/// Validated, integer-indexed view of a registered graph.
///
/// Built once at the start of a run from the names the builder collected.
/// Node indices follow registration order, so the `i`-th registered vertex
/// is `NodeIndex::new(i)`.
///
/// Edge direction: dependency -> dependent. For `add_edge("A", "B")` the
/// graph holds `A -> B`.
#[derive(Debug, Clone)]
pub struct DagGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl DagGraph {
    /// Build the arena and run every integrity check:
    ///
    /// - no vertex name is registered twice
    /// - every edge endpoint names a registered vertex
    /// - the dependency relation is acyclic
    ///
    /// Repeated edges between the same pair collapse into one.
    pub fn build<'a, V, E>(vertices: V, edges: E) -> Result<Self>
    where
        V: IntoIterator<Item = &'a str>,
        E: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut index: HashMap<String, NodeIndex> = HashMap::new();

        for name in vertices {
            if index.contains_key(name) {
                return Err(DagError::DuplicateVertex(name.to_string()));
            }
            let node = graph.add_node(name.to_string());
            index.insert(name.to_string(), node);
        }

        let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
        for (from, to) in edges {
            let lookup = |name: &str| {
                index
                    .get(name)
                    .copied()
                    .ok_or_else(|| DagError::MissingVertex {
                        from: from.to_string(),
                        to: to.to_string(),
                        missing: name.to_string(),
                    })
            };
            let (a, b) = (lookup(from)?, lookup(to)?);
            if seen.insert((a, b)) {
                graph.add_edge(a, b, ());
            }
        }

        let dag = Self { graph, index };
        dag.ensure_acyclic()?;

        debug!(
            vertices = dag.len(),
            edges = dag.edge_count(),
            "graph validated"
        );
        Ok(dag)
    }

    /// Kahn's algorithm, used only as a feasibility check: peel vertices with
    /// no remaining incoming edges until nothing more can be removed.
    fn ensure_acyclic(&self) -> Result<()> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|n| self.graph.neighbors_directed(n, Direction::Incoming).count())
            .collect();

        let mut ready: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|n| in_degree[n.index()] == 0)
            .collect();

        let mut removed = 0usize;
        while let Some(node) = ready.pop_front() {
            removed += 1;
            for dependent in self.graph.neighbors_directed(node, Direction::Outgoing) {
                let remaining = &mut in_degree[dependent.index()];
                *remaining -= 1;
                if *remaining == 0 {
                    ready.push_back(dependent);
                }
            }
        }

        if removed == self.len() {
            return Ok(());
        }

        let mut stuck: Vec<String> = self
            .graph
            .node_indices()
            .filter(|n| in_degree[n.index()] > 0)
            .map(|n| self.graph[n].clone())
            .collect();
        stuck.sort();
        Err(DagError::CycleDetected(stuck))
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All vertex indices, in registration order.
    pub fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn name(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    pub fn index_of(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    /// Immediate dependencies of a vertex (sources of its incoming edges).
    pub fn dependencies_of(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(node, Direction::Incoming)
    }

    /// Immediate dependents of a vertex (targets of its outgoing edges).
    pub fn dependents_of(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(node, Direction::Outgoing)
    }
}
