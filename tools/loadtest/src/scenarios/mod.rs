//! Scenario definition for a simulated shortener client
//!
//! A `ScenarioDefinition` lists the weighted tasks one client may run.
//! It is immutable once built and holds no per-run state, so any driver
//! can share it between users and call tasks on its own schedule.

pub mod shorten_batch;
pub mod shorten_one;

use crate::error::{ConfigError, ScenarioError};
use crate::session::Session;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound for a task weight. goose expands weights into a schedule
/// vector, so this bounds its size.
pub const MAX_WEIGHT: usize = 1000;

/// Behavior behind a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    ShortenOne,
    ShortenBatch,
}

/// What a finished task produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Shortened { short_url: String },
    Batched { entries: usize },
}

/// A named, weighted unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: &'static str,
    pub weight: usize,
    pub kind: TaskKind,
}

impl Task {
    pub fn new(name: &'static str, kind: TaskKind) -> Self {
        Self { name, weight: 1, kind }
    }

    /// Execute one invocation of this task on `session`.
    pub async fn run<S: Session + ?Sized>(&self, session: &mut S) -> Result<TaskOutcome, ScenarioError> {
        match self.kind {
            TaskKind::ShortenOne => {
                let short_url = shorten_one::run(session).await?;
                Ok(TaskOutcome::Shortened { short_url })
            }
            TaskKind::ShortenBatch => {
                let entries = shorten_batch::run(session).await?;
                Ok(TaskOutcome::Batched { entries })
            }
        }
    }
}

/// The set of tasks available to one simulated client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioDefinition {
    pub name: &'static str,
    tasks: Vec<Task>,
}

impl ScenarioDefinition {
    /// Shorten and batch tasks with equal weight.
    pub fn shortener() -> Self {
        Self {
            name: "ShortenerUser",
            tasks: vec![
                Task::new("shorten", TaskKind::ShortenOne),
                Task::new("shorten_batch", TaskKind::ShortenBatch),
            ],
        }
    }

    /// Shortener scenario with explicit weights, each in `1..=MAX_WEIGHT`.
    pub fn with_weights(shorten: usize, batch: usize) -> Result<Self, ConfigError> {
        let mut definition = Self::shortener();
        for (task, weight) in definition.tasks.iter_mut().zip([shorten, batch]) {
            if weight == 0 {
                return Err(ConfigError::ZeroWeight { task: task.name.to_string() });
            }
            if weight > MAX_WEIGHT {
                return Err(ConfigError::WeightTooLarge {
                    task: task.name.to_string(),
                    weight,
                    max: MAX_WEIGHT,
                });
            }
            task.weight = weight;
        }
        Ok(definition)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, kind: TaskKind) -> Option<&Task> {
        self.tasks.iter().find(|t| t.kind == kind)
    }

    pub fn total_weight(&self) -> usize {
        self.tasks.iter().map(|t| t.weight).sum()
    }

    /// Weighted random choice of the next task.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &Task {
        let mut roll = rng.gen_range(0..self.total_weight());
        for task in &self.tasks {
            if roll < task.weight {
                return task;
            }
            roll -= task.weight;
        }
        // Unreachable while every weight is positive
        &self.tasks[self.tasks.len() - 1]
    }
}

impl Default for ScenarioDefinition {
    fn default() -> Self {
        Self::shortener()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_definition() {
        let def = ScenarioDefinition::shortener();
        assert_eq!(def.tasks().len(), 2);
        assert!(def.tasks().iter().all(|t| t.weight == 1));
        assert_eq!(def.tasks()[0].kind, TaskKind::ShortenOne);
        assert_eq!(def.tasks()[1].kind, TaskKind::ShortenBatch);
        assert_eq!(def.total_weight(), 2);
    }

    #[test]
    fn test_zero_weight_rejected() {
        let err = ScenarioDefinition::with_weights(0, 1).unwrap_err();
        assert_eq!(err, ConfigError::ZeroWeight { task: "shorten".into() });

        let err = ScenarioDefinition::with_weights(2, 0).unwrap_err();
        assert_eq!(err, ConfigError::ZeroWeight { task: "shorten_batch".into() });
    }

    #[test]
    fn test_oversized_weight_rejected() {
        assert!(ScenarioDefinition::with_weights(MAX_WEIGHT, MAX_WEIGHT).is_ok());

        let err = ScenarioDefinition::with_weights(MAX_WEIGHT + 1, 1).unwrap_err();
        assert_eq!(
            err,
            ConfigError::WeightTooLarge {
                task: "shorten".into(),
                weight: MAX_WEIGHT + 1,
                max: MAX_WEIGHT,
            }
        );
        assert!(matches!(
            ScenarioDefinition::with_weights(1, usize::MAX),
            Err(ConfigError::WeightTooLarge { .. })
        ));
    }

    #[test]
    fn test_with_weights() {
        let def = ScenarioDefinition::with_weights(3, 1).unwrap();
        assert_eq!(def.task(TaskKind::ShortenOne).unwrap().weight, 3);
        assert_eq!(def.task(TaskKind::ShortenBatch).unwrap().weight, 1);
        assert_eq!(def.total_weight(), 4);
    }

    #[test]
    fn test_choose_is_deterministic_per_seed() {
        let def = ScenarioDefinition::with_weights(3, 2).unwrap();
        let mut r1 = ChaCha8Rng::seed_from_u64(42);
        let mut r2 = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(def.choose(&mut r1).kind, def.choose(&mut r2).kind);
        }
    }

    #[test]
    fn test_choose_follows_weights() {
        let def = ScenarioDefinition::with_weights(3, 1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let picks = 8_000;
        let shorten = (0..picks)
            .filter(|_| def.choose(&mut rng).kind == TaskKind::ShortenOne)
            .count();
        // Expected 6000; allow generous slack
        assert!(shorten > 5_600 && shorten < 6_400, "got {}", shorten);
    }
}
