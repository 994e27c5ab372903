//! Request statistics for smoke runs
//!
//! Counts requests, failures and latency per (method, logical name).
//! The table is shared behind `Arc` so several sessions may report into it.

use crate::request::Method;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Latency histogram bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyBucket {
    pub label: String,
    pub lower_ms: u64,
    pub upper_ms: u64,
    pub count: u64,
}

/// Aggregated counters for one (method, name) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointStats {
    pub method: Method,
    pub name: String,
    pub requests: u64,
    pub failures: u64,
    pub total_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
    pub latency_buckets: Vec<LatencyBucket>,
}

impl EndpointStats {
    fn new(method: Method, name: String) -> Self {
        Self {
            method,
            name,
            requests: 0,
            failures: 0,
            total_ms: 0,
            min_ms: u64::MAX,
            max_ms: 0,
            latency_buckets: default_buckets(),
        }
    }

    fn record(&mut self, elapsed: Duration, failed: bool) {
        let ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.requests += 1;
        if failed {
            self.failures += 1;
        }
        self.total_ms = self.total_ms.saturating_add(ms);
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);

        match self
            .latency_buckets
            .iter_mut()
            .find(|b| ms >= b.lower_ms && ms < b.upper_ms)
        {
            Some(bucket) => bucket.count += 1,
            // Overflow bucket (last)
            None => {
                if let Some(last) = self.latency_buckets.last_mut() {
                    last.count += 1;
                }
            }
        }
    }

    /// Mean latency in milliseconds.
    pub fn mean_ms(&self) -> f64 {
        if self.requests == 0 {
            return 0.0;
        }
        self.total_ms as f64 / self.requests as f64
    }
}

/// Thread-safe per-endpoint statistics table.
#[derive(Debug, Default)]
pub struct RequestStats {
    endpoints: DashMap<(Method, String), EndpointStats>,
}

impl RequestStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self, method: Method, name: &str, elapsed: Duration) {
        self.record(method, name, elapsed, false);
    }

    pub fn record_failure(&self, method: Method, name: &str, elapsed: Duration) {
        self.record(method, name, elapsed, true);
    }

    fn record(&self, method: Method, name: &str, elapsed: Duration, failed: bool) {
        self.endpoints
            .entry((method, name.to_string()))
            .or_insert_with(|| EndpointStats::new(method, name.to_string()))
            .record(elapsed, failed);
    }

    /// Stats for one endpoint, if it has seen any request.
    pub fn get(&self, method: Method, name: &str) -> Option<EndpointStats> {
        self.endpoints
            .get(&(method, name.to_string()))
            .map(|e| e.value().clone())
    }

    /// All endpoints, sorted by name then method.
    pub fn snapshot(&self) -> Vec<EndpointStats> {
        let mut all: Vec<EndpointStats> = self.endpoints.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.method.as_str().cmp(b.method.as_str())));
        all
    }

    pub fn total_requests(&self) -> u64 {
        self.endpoints.iter().map(|e| e.requests).sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.endpoints.iter().map(|e| e.failures).sum()
    }

    /// One line per endpoint.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "{:<6} {:<28} {:>8} {:>8} {:>10} {:>8}",
            "Type", "Name", "Reqs", "Fails", "Avg(ms)", "Max(ms)"
        )];
        for e in self.snapshot() {
            lines.push(format!(
                "{:<6} {:<28} {:>8} {:>8} {:>10.1} {:>8}",
                e.method, e.name, e.requests, e.failures, e.mean_ms(), e.max_ms
            ));
        }
        lines.push(format!(
            "Total: {} requests, {} failures",
            self.total_requests(),
            self.total_failures()
        ));
        lines.join("\n")
    }
}

/// Default latency histogram buckets.
fn default_buckets() -> Vec<LatencyBucket> {
    vec![
        LatencyBucket { label: "<10ms".into(), lower_ms: 0, upper_ms: 10, count: 0 },
        LatencyBucket { label: "10-50ms".into(), lower_ms: 10, upper_ms: 50, count: 0 },
        LatencyBucket { label: "50-100ms".into(), lower_ms: 50, upper_ms: 100, count: 0 },
        LatencyBucket { label: "100-500ms".into(), lower_ms: 100, upper_ms: 500, count: 0 },
        LatencyBucket { label: "500ms-1s".into(), lower_ms: 500, upper_ms: 1_000, count: 0 },
        LatencyBucket { label: "1-5s".into(), lower_ms: 1_000, upper_ms: 5_000, count: 0 },
        LatencyBucket { label: ">5s".into(), lower_ms: 5_000, upper_ms: u64::MAX, count: 0 },
    ]
}
