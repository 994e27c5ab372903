//! goose driver
//!
//! goose owns user spawning, weighted transaction choice, the shared HTTP
//! client and all reporting. This module only adapts a `GooseUser` to the
//! `Session` seam and registers the scenario tasks as transactions.

use crate::config::AttackConfig;
use crate::error::ScenarioError;
use crate::request::{Method, Reply, RequestRecord};
use crate::scenarios::{shorten_batch, shorten_one, ScenarioDefinition, TaskKind};
use crate::session::Session;
use async_trait::async_trait;
use goose::config::GooseConfiguration;
use goose::goose::GooseResponse;
use goose::metrics::{GooseMetrics, GooseRawRequest, GooseRequestMetric};
use goose::prelude::*;
use serde_json::Value;

/// `Session` over one goose user.
///
/// goose records every request it sends, including transport and status
/// failures. The last request metric is kept so a failure detected later
/// (a missing `result` field) can be attributed to it. Errors goose raises
/// before a request exists are kept as-is and handed back from `fail`.
pub struct GooseSession<'a> {
    user: &'a mut GooseUser,
    last_request: Option<GooseRequestMetric>,
    engine_error: Option<Box<TransactionError>>,
}

impl<'a> GooseSession<'a> {
    pub fn new(user: &'a mut GooseUser) -> Self {
        Self {
            user,
            last_request: None,
            engine_error: None,
        }
    }

    /// Metric of the most recent request goose sent for this session.
    pub fn last_request(&self) -> Option<&GooseRequestMetric> {
        self.last_request.as_ref()
    }

    /// Report `error` to goose as a failed transaction.
    ///
    /// Always returns `Err`, since goose only looks at `is_ok()` to decide
    /// whether the transaction succeeded.
    pub fn fail(mut self, error: &ScenarioError) -> TransactionResult {
        if let Some(mut metric) = self.last_request.take() {
            return self.user.set_failure(&error.to_string(), &mut metric, None, None);
        }
        tracing::warn!(error = %error, "task failed before goose recorded a request");
        match self.engine_error.take() {
            Some(engine_error) => Err(engine_error),
            None => Err(Box::new(TransactionError::RequestFailed {
                raw_request: unsent_request(self.user, error),
            })),
        }
    }

    fn engine_failure(&mut self, error: Box<TransactionError>) -> ScenarioError {
        let scenario_error = ScenarioError::Transport(error.to_string());
        self.engine_error = Some(error);
        scenario_error
    }

    async fn dispatch(&mut self, request: &RequestRecord) -> Result<GooseResponse, ScenarioError> {
        let path = request.path.as_str();
        let sent = match (request.method, request.name.as_deref(), &request.body) {
            (Method::Get, Some(name), _) => self.user.get_named(path, name).await,
            (Method::Get, None, _) => self.user.get(path).await,
            (Method::Post, None, body) => {
                let body = body.clone().unwrap_or(Value::Null);
                self.user.post_json(path, &body).await
            }
            (Method::Post, Some(name), body) => {
                let body = body.clone().unwrap_or(Value::Null);
                let builder = match self.user.get_request_builder(&GooseMethod::Post, path) {
                    Ok(builder) => builder.json(&body),
                    Err(e) => return Err(self.engine_failure(e)),
                };
                let goose_request = GooseRequest::builder()
                    .method(GooseMethod::Post)
                    .path(path)
                    .name(name)
                    .set_request_builder(builder)
                    .build();
                self.user.request(goose_request).await
            }
        };
        sent.map_err(|e| self.engine_failure(e))
    }
}

/// Metric for a request that was never built, so goose has something to
/// carry in `RequestFailed`. It is not sent to the metrics channel.
fn unsent_request(user: &GooseUser, error: &ScenarioError) -> GooseRequestMetric {
    GooseRequestMetric {
        elapsed: user.started.elapsed().as_millis() as u64,
        scenario_index: 0,
        scenario_name: String::new(),
        transaction_index: String::new(),
        transaction_name: String::new(),
        raw: GooseRawRequest {
            // Every task opens with a POST
            method: GooseMethod::Post,
            url: user.base_url.to_string(),
            headers: Vec::new(),
            body: String::new(),
        },
        name: String::new(),
        final_url: String::new(),
        redirected: false,
        response_time: 0,
        status_code: 0,
        success: false,
        update: false,
        user: user.weighted_users_index,
        error: error.to_string(),
        coordinated_omission_elapsed: 0,
        user_cadence: 0,
    }
}

#[async_trait]
impl<'a> Session for GooseSession<'a> {
    async fn send(&mut self, request: RequestRecord) -> Result<Reply, ScenarioError> {
        let goose = self.dispatch(&request).await?;
        self.last_request = Some(goose.request);

        let response = goose
            .response
            .map_err(|e| ScenarioError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScenarioError::Status {
                method: request.method,
                path: request.path,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ScenarioError::Transport(e.to_string()))?;
        Ok(Reply::new(status.as_u16(), body.to_vec(), request.path))
    }
}

/// Transaction: shorten one URL and follow the short link.
pub async fn shorten_transaction(user: &mut GooseUser) -> TransactionResult {
    let mut session = GooseSession::new(user);
    match shorten_one::run(&mut session).await {
        Ok(_) => Ok(()),
        Err(e) => session.fail(&e),
    }
}

/// Transaction: shorten a batch of URLs.
pub async fn shorten_batch_transaction(user: &mut GooseUser) -> TransactionResult {
    let mut session = GooseSession::new(user);
    match shorten_batch::run(&mut session).await {
        Ok(_) => Ok(()),
        Err(e) => session.fail(&e),
    }
}

/// goose scenario mirroring `definition`'s tasks and weights.
pub fn build_scenario(definition: &ScenarioDefinition) -> Result<Scenario, GooseError> {
    let mut scenario = Scenario::new(definition.name);
    for task in definition.tasks() {
        let transaction = match task.kind {
            TaskKind::ShortenOne => transaction!(shorten_transaction),
            TaskKind::ShortenBatch => transaction!(shorten_batch_transaction),
        };
        scenario = scenario.register_transaction(transaction.set_name(task.name).set_weight(task.weight)?);
    }
    Ok(scenario)
}

/// Configure and run a goose attack.
pub async fn run_attack(config: &AttackConfig) -> Result<GooseMetrics, GooseError> {
    let mut attack = GooseAttack::initialize_with_config(GooseConfiguration::default())?
        .register_scenario(build_scenario(&config.definition)?)
        .set_default(GooseDefault::Host, config.host.as_str())?
        .set_default(GooseDefault::Users, config.users)?
        .set_default(GooseDefault::HatchRate, config.hatch_rate.as_str())?
        .set_default(GooseDefault::RunTime, config.run_time)?;
    if let Some(report) = &config.report_file {
        attack = attack.set_default(GooseDefault::ReportFile, report.as_str())?;
    }

    tracing::info!(
        host = %config.host,
        users = config.users,
        run_time = config.run_time,
        "starting goose attack"
    );
    attack.execute().await
}
