//! Session seam between tasks and whatever drives them
//!
//! A session owns the connection, base URL and statistics capture of one
//! simulated client. Tasks only call `send` and read the reply.

use crate::error::ScenarioError;
use crate::request::{Reply, RequestRecord};
use async_trait::async_trait;

#[async_trait]
pub trait Session: Send {
    /// Issue one request and wait for its reply.
    ///
    /// Transport failures and non-success statuses come back as errors;
    /// the session has already recorded them by the time it returns.
    async fn send(&mut self, request: RequestRecord) -> Result<Reply, ScenarioError>;
}

