//! Single-client smoke runner
//!
//! Runs scenario tasks one after another on one session. A failed task is
//! logged and counted, then the next task starts, the same way a load
//! engine treats a failed transaction.

use crate::scenarios::{ScenarioDefinition, Task};
use crate::session::Session;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Outcome counts of a smoke run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmokeReport {
    pub tasks_run: u64,
    pub tasks_failed: u64,
    /// Task names in execution order.
    pub executed: Vec<&'static str>,
}

impl SmokeReport {
    pub fn passed(&self) -> bool {
        self.tasks_failed == 0
    }
}

/// Execute tasks from `definition` on `session`.
///
/// With `iterations` unset every task runs once in declaration order.
/// Otherwise `iterations` tasks are drawn by weight from a RNG seeded
/// with `seed`.
pub async fn run<S: Session + ?Sized>(
    session: &mut S,
    definition: &ScenarioDefinition,
    iterations: Option<usize>,
    seed: u64,
) -> SmokeReport {
    let plan: Vec<&Task> = match iterations {
        None => definition.tasks().iter().collect(),
        Some(n) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..n).map(|_| definition.choose(&mut rng)).collect()
        }
    };

    let mut report = SmokeReport::default();
    for task in plan {
        report.tasks_run += 1;
        report.executed.push(task.name);
        match task.run(session).await {
            Ok(outcome) => tracing::info!(task = task.name, ?outcome, "task ok"),
            Err(e) => {
                report.tasks_failed += 1;
                tracing::warn!(task = task.name, error = %e, "task failed");
            }
        }
    }
    report
}
