use std::path::PathBuf;

use async_trait::async_trait;

/// The unit of domain logic gated by the interval runner.
///
/// Implementations must be safe to re-run: a failed run leaves the stored
/// state untouched, so the same window is attempted again on the next due
/// tick.
#[async_trait]
pub trait Work {
    /// Short name used to announce runs, e.g. "Connector run @ <time>".
    fn name(&self) -> &'static str;

    async fn run(&self) -> anyhow::Result<()>;
}

/// Fetches IDS alert knowledge and submits it to the intelligence platform.
///
/// Bundle construction and submission are not implemented yet: a run
/// announces itself and completes, which still advances the scheduling
/// state and exercises the full reporting path.
pub struct AlertKnowledgeWork {
    alert_logs_path: Option<PathBuf>,
    update_existing_data: bool,
}

impl AlertKnowledgeWork {
    pub fn new(alert_logs_path: Option<PathBuf>, update_existing_data: bool) -> Self {
        Self {
            alert_logs_path,
            update_existing_data,
        }
    }
}

#[async_trait]
impl Work for AlertKnowledgeWork {
    fn name(&self) -> &'static str {
        "Connector"
    }

    async fn run(&self) -> anyhow::Result<()> {
        tracing::info!("Fetching knowledge...");

        if let Some(alert_logs_path) = &self.alert_logs_path {
            tracing::debug!(
                "Reading alerts from {:?}, update existing data: {}",
                alert_logs_path,
                self.update_existing_data
            );
        }

        // TODO build an indicator bundle from the alert logs and submit it
        // to the platform once the alert parser lands

        Ok(())
    }
}
