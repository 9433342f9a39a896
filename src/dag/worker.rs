// src/dag/worker.rs

//! Per-vertex worker.
//!
//! Every vertex gets one worker task. The worker waits for all of its
//! dependencies to publish a terminal [`Outcome`], decides whether to run or
//! skip, and then publishes its own outcome on its `watch` channel so that
//! its dependents can make the same decision.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::sync::watch;
use tracing::{debug, error, warn};

use crate::dag::outcome::{Outcome, VertexReport};
use crate::dag::runner::Action;
use crate::errors::DagError;

/// Read side of a dependency's completion signal.
pub(crate) struct Dependency {
    pub name: String,
    pub done: watch::Receiver<Outcome>,
}

/// Drive a single vertex to a terminal outcome.
///
/// The outcome is published on `done` no matter which branch is taken, so
/// dependents never wait forever on a skipped or failed vertex.
pub(crate) async fn run_vertex(
    name: String,
    action: Action,
    deps: Vec<Dependency>,
    done: watch::Sender<Outcome>,
) -> VertexReport {
    let (outcome, error) = match wait_for_dependencies(&name, deps).await {
        Some(blocker) => {
            warn!(
                vertex = %name,
                dependency = %blocker,
                "dependency did not succeed; skipping vertex"
            );
            (Outcome::Skipped, None)
        }
        None => invoke(&name, action).await,
    };

    // No receivers is fine: leaves have nobody listening.
    done.send_replace(outcome);

    VertexReport {
        name,
        outcome,
        error,
    }
}

/// Wait until every dependency is terminal.
///
/// Returns the name of the first dependency (in edge order) that did not
/// succeed, or `None` if all of them succeeded.
async fn wait_for_dependencies(vertex: &str, deps: Vec<Dependency>) -> Option<String> {
    let mut blocker = None;

    for mut dep in deps {
        let outcome = terminal_outcome(&mut dep.done).await;
        debug!(
            vertex = %vertex,
            dependency = %dep.name,
            %outcome,
            "dependency reached terminal state"
        );
        if !outcome.is_success() && blocker.is_none() {
            blocker = Some(dep.name);
        }
    }

    blocker
}

async fn terminal_outcome(done: &mut watch::Receiver<Outcome>) -> Outcome {
    match done.wait_for(Outcome::is_terminal).await {
        Ok(seen) => *seen,
        // The dependency's worker went away without publishing.
        Err(_) => Outcome::Failed,
    }
}

/// Run the action inline on this worker's task.
///
/// Panics are caught and reported as a failure of this vertex. Because the
/// action is polled by the worker itself, dropping the run (and with it the
/// `JoinSet`) aborts in-flight actions too.
async fn invoke(name: &str, action: Action) -> (Outcome, Option<DagError>) {
    debug!(vertex = %name, "dependencies satisfied; running action");

    // The closure is called inside the future so a panic while building the
    // action's future is caught as well.
    match AssertUnwindSafe(async move { action().await })
        .catch_unwind()
        .await
    {
        Ok(Ok(())) => {
            debug!(vertex = %name, "action succeeded");
            (Outcome::Succeeded, None)
        }
        Ok(Err(err)) => {
            warn!(
                vertex = %name,
                error = %err,
                "action failed; dependents will be skipped"
            );
            (Outcome::Failed, Some(DagError::Action(err)))
        }
        Err(_panic) => {
            error!(vertex = %name, "action panicked");
            (
                Outcome::Failed,
                Some(DagError::ActionPanicked {
                    vertex: name.to_string(),
                }),
            )
        }
    }
}
