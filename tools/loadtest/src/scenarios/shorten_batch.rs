//! Shorten a batch of URLs in one request
//!
//! The reply is not inspected beyond its status; this task measures
//! throughput of the batch endpoint only.

use crate::error::ScenarioError;
use crate::generator::{self, BATCH_SIZE};
use crate::request::RequestRecord;
use crate::session::Session;
use types::api::SHORTEN_BATCH_PATH;

/// Run the task once. Returns the number of entries submitted.
pub async fn run<S: Session + ?Sized>(session: &mut S) -> Result<usize, ScenarioError> {
    let batch = generator::batch_request(BATCH_SIZE);
    session
        .send(RequestRecord::post_json(SHORTEN_BATCH_PATH, &batch)?)
        .await?;

    tracing::debug!(entries = batch.len(), "batch submitted");
    Ok(batch.len())
}
