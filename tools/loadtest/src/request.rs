//! Request and reply records
//!
//! A `RequestRecord` is what a task hands to its session: method, path,
//! optional JSON body and optional logical name. Records are ephemeral and
//! never persisted.

use crate::error::ScenarioError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// HTTP methods the scenario issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One HTTP call issued by a task.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRecord {
    pub method: Method,
    /// Relative path, or an absolute URL when the service returned one.
    pub path: String,
    pub body: Option<Value>,
    /// Statistics label; falls back to `path` when unset.
    pub name: Option<String>,
}

impl RequestRecord {
    /// A GET with no body.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
            name: None,
        }
    }

    /// A POST carrying `body` serialized as JSON.
    pub fn post_json<T: Serialize + ?Sized>(
        path: impl Into<String>,
        body: &T,
    ) -> Result<Self, ScenarioError> {
        let body = serde_json::to_value(body).map_err(ScenarioError::Encode)?;
        Ok(Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
            name: None,
        })
    }

    /// Report this request under a fixed logical name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Label used to group statistics for this request.
    pub fn stats_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}

/// A completed HTTP exchange as seen by a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: Vec<u8>,
    /// Path of the request that produced this reply, for error context.
    pub path: String,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>, path: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            path: path.into(),
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ScenarioError> {
        serde_json::from_slice(&self.body).map_err(ScenarioError::Decode)
    }

    /// Extract a required top-level string field from a JSON object body.
    pub fn field(&self, field: &str) -> Result<String, ScenarioError> {
        let value: Value = self.json()?;
        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| ScenarioError::MissingField {
                field: field.to_string(),
                path: self.path.clone(),
            })
    }
}
