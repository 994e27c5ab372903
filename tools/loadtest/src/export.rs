//! Smoke run export
//!
//! Serializes the per-endpoint table of a smoke run to JSON.

use crate::metrics::{EndpointStats, RequestStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a smoke run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeExport {
    pub version: String,
    pub host: String,
    pub finished_at: DateTime<Utc>,
    pub tasks_run: u64,
    pub tasks_failed: u64,
    pub total_requests: u64,
    pub total_failures: u64,
    pub endpoints: Vec<EndpointStats>,
}

/// Build an export from a stats table.
pub fn build_export(host: &str, tasks_run: u64, tasks_failed: u64, stats: &RequestStats) -> SmokeExport {
    SmokeExport {
        version: crate::VERSION.to_string(),
        host: host.to_string(),
        finished_at: Utc::now(),
        tasks_run,
        tasks_failed,
        total_requests: stats.total_requests(),
        total_failures: stats.total_failures(),
        endpoints: stats.snapshot(),
    }
}

pub fn export_json(export: &SmokeExport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(export)
}

/// Write export to a file path.
pub fn write_to_file(export: &SmokeExport, path: impl AsRef<Path>) -> std::io::Result<()> {
    let json = export_json(export)?;
    std::fs::write(path, json)
}
