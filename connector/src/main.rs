use std::time::Duration;

use clap::Parser;
use common::tracing::{init_tracing, log_task_result_exit};
use tokio_util::sync::CancellationToken;

use crate::cli::Cli;
use crate::runner::{IntervalConfig, IntervalRunner};
use crate::state::FileStateStore;
use crate::work::AlertKnowledgeWork;
use crate::work_api::WorkApiClient;

mod cli;
mod error;
mod runner;
mod state;
mod work;
mod work_api;

/// How long the process lingers after a startup failure before exiting,
/// so the error is visible and the supervisor doesn't restart in a tight loop.
const STARTUP_FAILURE_DELAY: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    init_tracing("connector=debug,info");

    let cli = Cli::parse();

    tracing::info!("Starting with config: {:?}", cli);

    if let Err(e) = start(cli).await {
        tracing::error!("Failed to start connector: {:#}", e);
        tokio::time::sleep(STARTUP_FAILURE_DELAY).await;
    }
}

async fn start(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        connector_id,
        api_url,
        interval_days,
        update_existing_data,
        alert_logs_path,
        state_path,
        poll_delay_seconds,
    } = cli;

    let config = IntervalConfig::new(interval_days)?;

    let work_api_client = WorkApiClient::new(api_url);

    // Check the platform is reachable before entering the loop; a failure
    // here is only a warning since the loop retries every tick anyway
    match work_api_client.get_health_check().await {
        Ok(()) => tracing::info!("Work API health check OK"),
        Err(e) => tracing::warn!("Work API health check failed: {:?}", e),
    }

    tracing::info!("Using state location {:?}", state_path);
    let state_store = FileStateStore::new(&state_path)?;

    let work = AlertKnowledgeWork::new(alert_logs_path, update_existing_data);

    let runner = IntervalRunner::new(config, state_store, work_api_client, work, connector_id);

    let poll_delay = Duration::from_secs(u64::from(poll_delay_seconds.get()));

    let shutdown = CancellationToken::new();

    let mut connector_service = tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            runner.run(poll_delay, shutdown).await;
            anyhow::Ok(())
        }
    });

    tokio::select! {
        r = (&mut connector_service) => {
            log_task_result_exit("connector", r);
        },
        _ = tokio::signal::ctrl_c() => {
            shutdown.cancel();

            // Let an in-flight tick finish before the process exits
            let r = (&mut connector_service).await;
            log_task_result_exit("connector", r);
        },
    }

    Ok(())
}
