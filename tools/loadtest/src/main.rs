use anyhow::Result;
use clap::Parser;
use shortener_loadtest::config::{Cli, Mode, SmokeConfig};
use shortener_loadtest::http::HttpSession;
use shortener_loadtest::metrics::RequestStats;
use shortener_loadtest::scenarios::ScenarioDefinition;
use shortener_loadtest::{driver, export, smoke};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    tracing::info!("Shortener load test starting");
    tracing::info!("Host: {}", cli.host);

    match cli.mode {
        Mode::Attack(args) => {
            let config = args.into_config(&cli.host)?;
            tracing::info!("  Users: {}", config.users);
            tracing::info!("  Hatch rate: {}/sec", config.hatch_rate);
            tracing::info!("  Run time: {}s", config.run_time);
            driver::run_attack(&config)
                .await
                .map_err(|e| anyhow::anyhow!("goose attack failed: {}", e))?;
        }
        Mode::Smoke(args) => {
            let config = args.into_config(&cli.host)?;
            run_smoke(config).await?;
        }
    }

    tracing::info!("Load test complete");
    Ok(())
}

async fn run_smoke(config: SmokeConfig) -> Result<()> {
    let stats = Arc::new(RequestStats::new());
    let mut session = HttpSession::new(&config.host, &config.options, Arc::clone(&stats))?;
    let definition = ScenarioDefinition::shortener();

    let report = smoke::run(&mut session, &definition, config.iterations, config.seed).await;
    println!("{}", stats.summary());

    if let Some(path) = &config.export {
        let data = export::build_export(&config.host, report.tasks_run, report.tasks_failed, &stats);
        export::write_to_file(&data, path)?;
        tracing::info!("Export written to {}", path.display());
    }

    if !report.passed() {
        anyhow::bail!("{} of {} tasks failed", report.tasks_failed, report.tasks_run);
    }
    Ok(())
}
