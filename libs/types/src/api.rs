//! Shortener HTTP API shapes
//!
//! Paths and JSON bodies of the endpoints the load scenario drives.

use crate::ids::CorrelationId;
use serde::{Deserialize, Serialize};

/// Create a single short URL.
pub const SHORTEN_PATH: &str = "/api/shorten";

/// Create short URLs for a list of originals.
pub const SHORTEN_BATCH_PATH: &str = "/api/shorten/batch";

/// Logical name under which redirect follows are reported.
///
/// Every short id yields a distinct path; grouping them under one label
/// keeps per-request statistics in a single bucket.
pub const SHORT_ID_NAME: &str = "/[short_id]";

/// Body of `POST /api/shorten`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

/// Response of `POST /api/shorten`.
///
/// `result` is the short link. The service returns it as an absolute URL
/// (`<base>/<id>`) but a bare path is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub result: String,
}

/// One element of the `POST /api/shorten/batch` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub original_url: String,
    pub correlation_id: CorrelationId,
}

/// One element of the batch response array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResultItem {
    pub correlation_id: CorrelationId,
    pub short_url: String,
}
