use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use dagrun::Runner;

/// Records the order in which vertex actions ran.
///
/// Each action pushes its own name just before returning, so for an edge
/// `from -> to` the name `from` must appear before `to`.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    order: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.order.lock().unwrap().push(name.to_string());
    }

    /// Names in the order they were recorded.
    pub fn snapshot(&self) -> Vec<String> {
        self.order.lock().unwrap().clone()
    }

    pub fn ran(&self, name: &str) -> bool {
        self.order.lock().unwrap().iter().any(|n| n == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.order.lock().unwrap().iter().position(|n| n == name)
    }

    /// Panics unless both ran and `from` was recorded before `to`.
    pub fn assert_precedes(&self, from: &str, to: &str) {
        let order = self.snapshot();
        let from_idx = order.iter().position(|n| n == from);
        let to_idx = order.iter().position(|n| n == to);
        match (from_idx, to_idx) {
            (Some(f), Some(t)) => assert!(
                f < t,
                "from vertex '{from}' came after to vertex '{to}' in {order:?}"
            ),
            _ => panic!("expected both '{from}' and '{to}' to run, got {order:?}"),
        }
    }

    /// Register a vertex on `runner` that records its name and succeeds.
    pub fn add_ok(&self, runner: &mut Runner, name: &str) {
        let rec = self.clone();
        let vertex = name.to_string();
        runner.add_vertex(name, move || async move {
            rec.record(&vertex);
            Ok(())
        });
    }

    /// Register a vertex on `runner` that records its name and then fails
    /// with a message equal to `message`.
    pub fn add_failing(&self, runner: &mut Runner, name: &str, message: &str) {
        let rec = self.clone();
        let vertex = name.to_string();
        let message = message.to_string();
        runner.add_vertex(name, move || async move {
            rec.record(&vertex);
            Err(anyhow!(message))
        });
    }
}
