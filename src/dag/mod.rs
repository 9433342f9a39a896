// src/dag/mod.rs

//! DAG representation and execution.
//!
//! - [`graph`] turns registered names into a validated, integer-indexed
//!   arena (duplicate, reference and cycle checks).
//! - [`runner`] is the public builder and the run loop that fans workers out
//!   and collects their results.
//! - [`worker`] drives a single vertex: wait on dependencies, run or skip,
//!   publish the outcome.
//! - `outcome` defines the per-vertex terminal states.

pub mod graph;
pub(crate) mod outcome;
pub mod runner;
mod worker;

pub use graph::DagGraph;
pub use runner::{Action, ActionFuture, Runner};
