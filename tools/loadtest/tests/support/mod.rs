//! Shared test helpers: a scripted session and an in-process stub shortener.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use shortener_loadtest::error::ScenarioError;
use shortener_loadtest::request::{Reply, RequestRecord};
use shortener_loadtest::session::Session;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use types::api::{BatchItem, BatchResultItem, ShortenRequest};

/// Session that records every request and answers from a script.
///
/// Requests past the end of the script get `200 []`.
#[derive(Default)]
pub struct ScriptedSession {
    pub sent: Vec<RequestRecord>,
    script: VecDeque<Result<Reply, ScenarioError>>,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_json(mut self, status: u16, body: Value) -> Self {
        let bytes = serde_json::to_vec(&body).unwrap();
        self.script.push_back(Ok(Reply::new(status, bytes, "")));
        self
    }

    pub fn then_error(mut self, error: ScenarioError) -> Self {
        self.script.push_back(Err(error));
        self
    }
}

#[async_trait]
impl Session for ScriptedSession {
    async fn send(&mut self, request: RequestRecord) -> Result<Reply, ScenarioError> {
        let path = request.path.clone();
        self.sent.push(request);
        match self.script.pop_front() {
            Some(Ok(reply)) => Ok(Reply { path, ..reply }),
            Some(Err(e)) => Err(e),
            None => Ok(Reply::new(200, b"[]".to_vec(), path)),
        }
    }
}

/// How the stub answers `POST /api/shorten`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubMode {
    Normal,
    /// Like `Normal`, but short links redirect to a 200 page on the stub
    /// instead of the original URL, for clients that follow redirects.
    LocalRedirect,
    MissingResult,
    ServerError,
}

struct StubState {
    base_url: String,
    mode: StubMode,
    links: Mutex<HashMap<String, String>>,
    hits: Mutex<Vec<String>>,
}

impl StubState {
    fn hit(&self, line: String) {
        self.hits.lock().unwrap().push(line);
    }

    fn store(&self, original: &str) -> (String, bool) {
        let mut links = self.links.lock().unwrap();
        if let Some((id, _)) = links.iter().find(|(_, url)| url.as_str() == original) {
            return (id.clone(), true);
        }
        let id = format!("q{}", links.len() + 1);
        links.insert(id.clone(), original.to_string());
        (id, false)
    }
}

/// Running stub shortener bound to an ephemeral port.
pub struct StubServer {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubServer {
    pub async fn start(mode: StubMode) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let state = Arc::new(StubState {
            base_url: base_url.clone(),
            mode,
            links: Mutex::new(HashMap::new()),
            hits: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/shorten", post(shorten))
            .route("/api/shorten/batch", post(shorten_batch))
            .route("/:id", get(redirect))
            .route("/landing/:id", get(landing))
            .with_state(Arc::clone(&state));

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, state }
    }

    /// "METHOD path" lines in arrival order.
    pub fn hits(&self) -> Vec<String> {
        self.state.hits.lock().unwrap().clone()
    }

    pub fn link_count(&self) -> usize {
        self.state.links.lock().unwrap().len()
    }
}

async fn shorten(State(state): State<Arc<StubState>>, Json(req): Json<ShortenRequest>) -> Response {
    state.hit("POST /api/shorten".to_string());
    match state.mode {
        StubMode::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
        }
        StubMode::MissingResult => (StatusCode::CREATED, Json(json!({}))).into_response(),
        StubMode::Normal | StubMode::LocalRedirect => {
            let (id, existed) = state.store(&req.url);
            let status = if existed { StatusCode::CONFLICT } else { StatusCode::CREATED };
            let result = format!("{}/{}", state.base_url, id);
            (status, Json(json!({ "result": result }))).into_response()
        }
    }
}

async fn shorten_batch(State(state): State<Arc<StubState>>, Json(items): Json<Vec<BatchItem>>) -> Response {
    state.hit(format!("POST /api/shorten/batch {}", items.len()));
    let out: Vec<BatchResultItem> = items
        .iter()
        .map(|item| {
            let (id, _) = state.store(&item.original_url);
            BatchResultItem {
                correlation_id: item.correlation_id,
                short_url: format!("{}/{}", state.base_url, id),
            }
        })
        .collect();
    (StatusCode::CREATED, Json(out)).into_response()
}

async fn redirect(State(state): State<Arc<StubState>>, Path(id): Path<String>) -> Response {
    state.hit(format!("GET /{}", id));
    let original = state.links.lock().unwrap().get(&id).cloned();
    match original {
        Some(_) if state.mode == StubMode::LocalRedirect => {
            let location = format!("{}/landing/{}", state.base_url, id);
            (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response()
        }
        Some(url) => (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, url)]).into_response(),
        None => (StatusCode::BAD_REQUEST, "url not found").into_response(),
    }
}

async fn landing(State(state): State<Arc<StubState>>, Path(id): Path<String>) -> Response {
    state.hit(format!("GET /landing/{}", id));
    (StatusCode::OK, "landing").into_response()
}
