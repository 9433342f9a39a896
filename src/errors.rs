// src/errors.rs

//! Crate-wide error type for graph validation and execution.

use thiserror::Error;

/// Everything `Runner::run` can fail with.
///
/// The first three variants are graph-integrity errors: they are detected
/// before any vertex action is invoked. `Action` carries the error a vertex
/// action returned, untouched.
#[derive(Error, Debug)]
pub enum DagError {
    #[error("duplicate vertex: '{0}' was registered more than once")]
    DuplicateVertex(String),

    #[error("missing vertex: edge '{from}' -> '{to}' references unregistered vertex '{missing}'")]
    MissingVertex {
        from: String,
        to: String,
        missing: String,
    },

    /// Names of the vertices that could not be ordered, sorted.
    #[error("cycle detected in DAG involving vertices {0:?}")]
    CycleDetected(Vec<String>),

    /// Error returned by a vertex action, forwarded verbatim.
    ///
    /// Use `downcast_ref` on the inner error to recover the concrete type.
    #[error(transparent)]
    Action(anyhow::Error),

    #[error("action of vertex '{vertex}' panicked")]
    ActionPanicked { vertex: String },

    #[error("vertex worker did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl DagError {
    /// `true` for errors detected while validating the graph, i.e. before
    /// any action ran.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            DagError::DuplicateVertex(_)
                | DagError::MissingVertex { .. }
                | DagError::CycleDetected(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DagError>;
