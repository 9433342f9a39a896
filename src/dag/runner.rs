// src/dag/runner.rs

use std::future::Future;
use std::pin::Pin;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::config::model::GraphFile;
use crate::dag::graph::DagGraph;
use crate::dag::outcome::{Outcome, RunSummary};
use crate::dag::worker::{Dependency, run_vertex};
use crate::errors::{DagError, Result};
use crate::exec::command::run_command;

/// Boxed future returned by a vertex action.
pub type ActionFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;

/// Type-erased, single-shot vertex action.
pub type Action = Box<dyn FnOnce() -> ActionFuture + Send + 'static>;

struct Vertex {
    name: String,
    action: Action,
}

/// Dependency-graph runner.
///
/// Register vertices and edges, then call [`Runner::run`]. Registration does
/// no validation at all; unknown names, duplicates and cycles are reported
/// by `run` (or [`Runner::validate`]) before any action is invoked.
///
/// `run` consumes the runner, so a graph is executed at most once and can't
/// be modified while it runs.
#[derive(Default)]
pub struct Runner {
    vertices: Vec<Vertex>,
    edges: Vec<(String, String)>,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.vertices.iter().map(|v| v.name.as_str()).collect();
        f.debug_struct("Runner")
            .field("vertices", &names)
            .field("edges", &self.edges)
            .finish()
    }
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a runner from a parsed graph file.
    ///
    /// Each `[vertex.<name>]` becomes a vertex that runs its `cmd` through the
    /// platform shell, and each `after = [...]` entry becomes an edge from the
    /// listed vertex to this one. References are not checked here.
    pub fn from_config(cfg: &GraphFile) -> Self {
        let mut runner = Self::new();

        for (name, vertex) in cfg.vertex.iter() {
            let vertex_name = name.clone();
            let cmd = vertex.cmd.clone();
            runner.add_vertex(name.clone(), move || async move {
                run_command(&vertex_name, &cmd).await
            });

            for dep in vertex.after.iter() {
                runner.add_edge(dep.clone(), name.clone());
            }
        }

        runner
    }

    /// Register an async vertex.
    ///
    /// `action` is called at most once, on a Tokio worker thread, after all
    /// of the vertex's dependencies have succeeded.
    pub fn add_vertex<F, Fut>(&mut self, name: impl Into<String>, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.vertices.push(Vertex {
            name: name.into(),
            action: Box::new(move || -> ActionFuture { Box::pin(action()) }),
        });
    }

    /// Register a synchronous vertex. Its action runs on Tokio's blocking
    /// thread pool.
    ///
    /// Unlike async actions, a blocking action that has already started
    /// keeps running to completion if the run is dropped.
    pub fn add_blocking_vertex<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: FnOnce() -> anyhow::Result<()> + Send + 'static,
    {
        self.add_vertex(name, move || async move {
            match tokio::task::spawn_blocking(action).await {
                Ok(result) => result,
                // Re-raise so the worker reports it like any other panic.
                Err(join_err) if join_err.is_panic() => {
                    std::panic::resume_unwind(join_err.into_panic())
                }
                Err(join_err) => Err(join_err.into()),
            }
        });
    }

    /// Register a dependency: `to` may not start until `from` has finished
    /// successfully.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.edges.push((from.into(), to.into()));
    }

    /// Number of vertex registrations, duplicates included.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edge registrations, repeats included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Run the integrity checks `run` performs, without executing anything.
    pub fn validate(&self) -> Result<()> {
        self.graph().map(|_| ())
    }

    fn graph(&self) -> Result<DagGraph> {
        DagGraph::build(
            self.vertices.iter().map(|v| v.name.as_str()),
            self.edges.iter().map(|(from, to)| (from.as_str(), to.as_str())),
        )
    }

    /// Execute the whole graph.
    ///
    /// Resolves once every vertex has succeeded, failed or been skipped.
    /// Returns the first error observed (in completion order), or `Ok(())`
    /// if every vertex succeeded. Integrity errors are returned before any
    /// action runs.
    pub async fn run(self) -> Result<()> {
        let graph = self.graph()?;
        let vertices = self.vertices;

        info!(
            vertices = graph.len(),
            edges = graph.edge_count(),
            "starting DAG run"
        );

        // One completion signal per vertex, indexed like the arena.
        let (senders, receivers): (Vec<_>, Vec<_>) = graph
            .vertices()
            .map(|_| watch::channel(Outcome::Pending))
            .unzip();

        let mut workers = JoinSet::new();

        for ((node, vertex), done) in graph.vertices().zip(vertices).zip(senders) {
            let deps: Vec<Dependency> = graph
                .dependencies_of(node)
                .map(|dep| Dependency {
                    name: graph.name(dep).to_string(),
                    done: receivers[dep.index()].clone(),
                })
                .collect();

            debug!(
                vertex = %vertex.name,
                deps = deps.len(),
                "spawning vertex worker"
            );
            workers.spawn(run_vertex(vertex.name, vertex.action, deps, done));
        }

        // Workers hold their own clones; keeping these would only keep the
        // channels open longer than needed.
        drop(receivers);

        let mut summary = RunSummary::default();
        let mut first_error: Option<DagError> = None;

        while let Some(joined) = workers.join_next().await {
            let report = match joined {
                Ok(report) => report,
                Err(join_err) => {
                    error!(error = %join_err, "vertex worker did not complete");
                    if first_error.is_none() {
                        first_error = Some(DagError::Join(join_err));
                    }
                    continue;
                }
            };

            debug!(vertex = %report.name, outcome = %report.outcome, "vertex finished");
            summary.record(report.outcome);

            if let Some(err) = report.error {
                if first_error.is_none() {
                    first_error = Some(err);
                } else {
                    debug!(
                        vertex = %report.name,
                        error = %err,
                        "discarding error; an earlier failure is already captured"
                    );
                }
            }
        }

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            "DAG run finished"
        );

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
