//! URL shortener load scenario
//!
//! Simulated-client behavior against a URL shortener HTTP API. Tasks are
//! stateless async procedures written against the `Session` seam, so goose
//! or the built-in smoke runner can drive them on their own schedule.
//!
//! # Modules
//! - `scenarios`: Scenario definition and the shorten / batch tasks
//! - `session`: Session trait every driver implements
//! - `request`: Request and reply records
//! - `generator`: Unique original URLs and batch payloads
//! - `http`: reqwest-backed session
//! - `driver`: goose adapter and attack assembly
//! - `smoke`: Single-client sequential runner
//! - `metrics`: Per-endpoint counters and latency buckets for smoke runs
//! - `export`: JSON export of a smoke run
//! - `config`: CLI and environment configuration
//! - `error`: Error taxonomy

pub mod config;
pub mod driver;
pub mod error;
pub mod export;
pub mod generator;
pub mod http;
pub mod metrics;
pub mod request;
pub mod scenarios;
pub mod session;
pub mod smoke;

/// Crate version constant
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
