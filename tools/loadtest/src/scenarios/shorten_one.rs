//! Shorten one URL, then follow the short link
//!
//! POSTs a fresh original URL, reads `result` from the reply and GETs it.
//! The GET is labelled `/[short_id]` so every short id lands in one
//! statistics bucket.

use crate::error::ScenarioError;
use crate::generator;
use crate::request::RequestRecord;
use crate::session::Session;
use types::api::{SHORTEN_PATH, SHORT_ID_NAME};

/// Run the task once. Returns the short link that was followed.
pub async fn run<S: Session + ?Sized>(session: &mut S) -> Result<String, ScenarioError> {
    let body = generator::shorten_request();
    let reply = session
        .send(RequestRecord::post_json(SHORTEN_PATH, &body)?)
        .await?;

    let short = reply.field("result")?;
    tracing::debug!(original = %body.url, short = %short, "shortened");

    session
        .send(RequestRecord::get(short.clone()).named(SHORT_ID_NAME))
        .await?;

    Ok(short)
}
