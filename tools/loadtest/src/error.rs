//! Error types for the load scenario
//!
//! A `ScenarioError` ends the current task invocation. Drivers record it
//! as a failed task and keep scheduling; nothing here retries.

use crate::request::Method;
use thiserror::Error;

/// Failure of a single task invocation
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{method} {path} returned status {status}")]
    Status {
        method: Method,
        path: String,
        status: u16,
    },

    #[error("Response is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Request body could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Response from {path} has no string field `{field}`")]
    MissingField { field: String, path: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Configuration errors, raised before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Task `{task}` must have a positive weight")]
    ZeroWeight { task: String },

    #[error("Task `{task}` weight {weight} exceeds the maximum of {max}")]
    WeightTooLarge { task: String, weight: usize, max: usize },

    #[error("Invalid host: {0}")]
    InvalidHost(String),

    #[error("At least one user is required")]
    ZeroUsers,
}
