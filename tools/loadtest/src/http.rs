//! reqwest-backed session
//!
//! One `HttpSession` is one simulated client: its own connection pool and
//! cookie jar, bound to a base host. Every exchange is timed and recorded
//! in the shared `RequestStats` under the request's logical name.

use crate::error::ScenarioError;
use crate::metrics::RequestStats;
use crate::request::{Method, Reply, RequestRecord};
use crate::session::Session;
use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, Url};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Client settings for an `HttpSession`.
#[derive(Debug, Clone)]
pub struct HttpSessionOptions {
    /// Follow 3xx responses. When off, a redirect counts as success.
    pub follow_redirects: bool,
    pub timeout: Duration,
}

impl Default for HttpSessionOptions {
    fn default() -> Self {
        Self {
            follow_redirects: false,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct HttpSession {
    client: Client,
    base_url: String,
    follow_redirects: bool,
    stats: Arc<RequestStats>,
}

impl HttpSession {
    pub fn new(
        base_url: &str,
        options: &HttpSessionOptions,
        stats: Arc<RequestStats>,
    ) -> Result<Self, ScenarioError> {
        Url::parse(base_url).map_err(|e| ScenarioError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let redirect = if options.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };
        let client = Client::builder()
            .cookie_store(true)
            .timeout(options.timeout)
            .redirect(redirect)
            .build()
            .map_err(|e| ScenarioError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            follow_redirects: options.follow_redirects,
            stats,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn stats(&self) -> &Arc<RequestStats> {
        &self.stats
    }

    /// Absolute URLs pass through; anything else is appended to the host.
    pub fn resolve(&self, path: &str) -> Result<Url, ScenarioError> {
        if let Ok(url) = Url::parse(path) {
            return Ok(url);
        }
        let joined = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Url::parse(&joined).map_err(|e| ScenarioError::InvalidUrl(format!("{}: {}", joined, e)))
    }

    fn accepts(&self, status: reqwest::StatusCode) -> bool {
        status.is_success() || (!self.follow_redirects && status.is_redirection())
    }
}

#[async_trait]
impl Session for HttpSession {
    async fn send(&mut self, request: RequestRecord) -> Result<Reply, ScenarioError> {
        let url = self.resolve(&request.path)?;
        let name = request.stats_name().to_string();

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = match builder.send().await {
            Ok(r) => r,
            Err(e) => {
                self.stats.record_failure(request.method, &name, started.elapsed());
                tracing::warn!(method = %request.method, name = %name, error = %e, "request failed");
                return Err(ScenarioError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                self.stats.record_failure(request.method, &name, started.elapsed());
                return Err(ScenarioError::Transport(e.to_string()));
            }
        };
        let elapsed = started.elapsed();

        if !self.accepts(status) {
            self.stats.record_failure(request.method, &name, elapsed);
            tracing::warn!(method = %request.method, name = %name, status = status.as_u16(), "unexpected status");
            return Err(ScenarioError::Status {
                method: request.method,
                path: request.path,
                status: status.as_u16(),
            });
        }

        self.stats.record_success(request.method, &name, elapsed);
        tracing::trace!(method = %request.method, name = %name, status = status.as_u16(), ?elapsed, "request done");
        Ok(Reply::new(status.as_u16(), body.to_vec(), request.path))
    }
}
