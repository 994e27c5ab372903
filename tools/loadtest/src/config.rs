//! Command line and environment configuration
//!
//! Raw arguments are parsed by clap, then validated into `AttackConfig` or
//! `SmokeConfig` before any client is built.

use crate::error::ConfigError;
use crate::http::HttpSessionOptions;
use crate::scenarios::ScenarioDefinition;
use clap::{Args, Parser, Subcommand};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

/// URL shortener load testing tool
#[derive(Parser, Debug)]
#[command(name = "shortener-loadtest")]
#[command(about = "Load scenario for the URL shortener HTTP API")]
#[command(version)]
pub struct Cli {
    /// Base URL of the shortener under test
    #[arg(long, global = true, default_value = "http://localhost:8080", env = "LOADTEST_HOST")]
    pub host: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Mode {
    /// Run the scenario under goose with many simulated users
    Attack(AttackArgs),

    /// Run the scenario with a single sequential client
    Smoke(SmokeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AttackArgs {
    /// Number of simulated users
    #[arg(long, default_value = "10", env = "LOADTEST_USERS")]
    pub users: usize,

    /// Users launched per second
    #[arg(long, default_value = "2")]
    pub hatch_rate: String,

    /// Run time in seconds
    #[arg(long, default_value = "60")]
    pub run_time: usize,

    /// Relative weight of the shorten task (1 to 1000)
    #[arg(long, default_value = "1")]
    pub shorten_weight: usize,

    /// Relative weight of the batch task (1 to 1000)
    #[arg(long, default_value = "1")]
    pub batch_weight: usize,

    /// Write goose's HTML report here
    #[arg(long)]
    pub report_file: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SmokeArgs {
    /// Tasks to run; defaults to one pass over every task
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Seed for weighted task choice
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Follow the redirect returned for a short link
    #[arg(long)]
    pub follow_redirects: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Write a JSON export of the run
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Validated goose run settings.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    pub host: String,
    pub users: usize,
    pub hatch_rate: String,
    pub run_time: usize,
    pub report_file: Option<String>,
    pub definition: ScenarioDefinition,
}

/// Validated smoke run settings.
#[derive(Debug, Clone)]
pub struct SmokeConfig {
    pub host: String,
    pub iterations: Option<usize>,
    pub seed: u64,
    pub options: HttpSessionOptions,
    pub export: Option<PathBuf>,
}

/// Accept only absolute http(s) URLs.
pub fn validate_host(host: &str) -> Result<String, ConfigError> {
    let url = Url::parse(host).map_err(|e| ConfigError::InvalidHost(format!("{}: {}", host, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(host.trim_end_matches('/').to_string()),
        other => Err(ConfigError::InvalidHost(format!("{}: unsupported scheme {}", host, other))),
    }
}

impl AttackArgs {
    pub fn into_config(self, host: &str) -> Result<AttackConfig, ConfigError> {
        if self.users == 0 {
            return Err(ConfigError::ZeroUsers);
        }
        Ok(AttackConfig {
            host: validate_host(host)?,
            users: self.users,
            hatch_rate: self.hatch_rate,
            run_time: self.run_time,
            report_file: self.report_file,
            definition: ScenarioDefinition::with_weights(self.shorten_weight, self.batch_weight)?,
        })
    }
}

impl SmokeArgs {
    pub fn into_config(self, host: &str) -> Result<SmokeConfig, ConfigError> {
        Ok(SmokeConfig {
            host: validate_host(host)?,
            iterations: self.iterations,
            seed: self.seed,
            options: HttpSessionOptions {
                follow_redirects: self.follow_redirects,
                timeout: Duration::from_secs(self.timeout_secs),
            },
            export: self.export,
        })
    }
}
