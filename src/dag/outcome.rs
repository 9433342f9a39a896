// src/dag/outcome.rs

//! Per-vertex outcome for a single run.

use std::fmt;

use crate::errors::DagError;

/// State of a vertex within one run.
///
/// `Pending` is the only non-terminal state; once a vertex leaves it the
/// value never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Still waiting on dependencies or running its action.
    Pending,
    /// The action ran and returned `Ok`.
    Succeeded,
    /// The action ran and returned an error (or panicked).
    Failed,
    /// The action was never invoked because a dependency did not succeed.
    Skipped,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Pending => "pending",
            Outcome::Succeeded => "succeeded",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

/// What a vertex worker hands back to the runner when it finishes.
#[derive(Debug)]
pub(crate) struct VertexReport {
    pub name: String,
    pub outcome: Outcome,
    /// Set only for `Failed`; skipped vertices contribute no error.
    pub error: Option<DagError>,
}

/// Terminal-outcome tally, logged at the end of a run.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Succeeded => self.succeeded += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Pending => {}
        }
    }
}
