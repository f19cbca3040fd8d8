use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use common::time::{self, duration_as_days, format_timestamp};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::error::{ConfigError, TickError};
use crate::state::{RunState, StateStore};
use crate::work::Work;
use crate::work_api::WorkReporter;

/// How often the connector is meant to perform its work.
#[derive(Debug, Clone, Copy)]
pub struct IntervalConfig {
    interval_days: u32,
}

impl IntervalConfig {
    pub fn new(interval_days: u32) -> Result<Self, ConfigError> {
        if interval_days < 1 {
            return Err(ConfigError::IntervalTooShort(interval_days));
        }

        Ok(Self { interval_days })
    }

    pub fn interval_days(&self) -> u32 {
        self.interval_days
    }

    /// The full interval between runs.
    pub fn interval(&self) -> Duration {
        Duration::days(i64::from(self.interval_days))
    }

    /// Elapsed time beyond which a run is due. One day less than the full
    /// interval, so a daily-scale check lands on the right day rather than
    /// drifting a full poll period past it.
    fn due_threshold(&self) -> Duration {
        Duration::days(i64::from(self.interval_days) - 1)
    }
}

/// The result of one scheduling check.
#[derive(Debug)]
pub enum TickOutcome {
    /// The work was due and completed; `last_run` now points at this tick.
    Ran,
    /// The work was not due yet.
    Skipped { remaining: Duration },
    /// The work was due but the tick failed; `last_run` is unchanged.
    Failed(TickError),
}

/// Decides, once per tick, whether the gated work should execute, executes
/// it when due and maintains the stored [`RunState`].
///
/// All collaborators are injected so the runner can be exercised without a
/// live platform session.
pub struct IntervalRunner<S, R, W> {
    config: IntervalConfig,
    state_store: S,
    reporter: R,
    work: W,
    connector_id: String,
}

impl<S, R, W> IntervalRunner<S, R, W>
where
    S: StateStore,
    R: WorkReporter,
    W: Work,
{
    pub fn new(
        config: IntervalConfig,
        state_store: S,
        reporter: R,
        work: W,
        connector_id: impl Into<String>,
    ) -> Self {
        Self {
            config,
            state_store,
            reporter,
            work,
            connector_id: connector_id.into(),
        }
    }

    /// Performs one scheduling check at `now`.
    ///
    /// Never panics and never lets a collaborator error escape: every
    /// failure is turned into [`TickOutcome::Failed`] so the caller only
    /// has to decide how long to wait before the next tick.
    pub async fn tick(&self, now: DateTime<Utc>) -> TickOutcome {
        let state = match self.state_store.get_state() {
            Ok(state) => state,
            Err(e) => {
                let e = TickError::Infra(e);
                tracing::error!("{}", e);
                return TickOutcome::Failed(e);
            }
        };

        match state {
            Some(RunState { last_run }) => {
                tracing::info!("Connector last run: {}", format_timestamp(last_run));

                // Due once strictly more than (interval - 1) days have
                // passed. A last run in the future (clock moved backwards)
                // gives a negative elapsed time and is never due.
                let elapsed = now - last_run;
                if elapsed <= self.config.due_threshold() {
                    let remaining = self.config.interval() - elapsed;
                    tracing::info!(
                        "Connector will not run, next run in: {:.2} days",
                        duration_as_days(remaining)
                    );
                    return TickOutcome::Skipped { remaining };
                }
            }
            None => tracing::info!("Connector has never run"),
        }

        self.run_due_work(now).await
    }

    async fn run_due_work(&self, now: DateTime<Utc>) -> TickOutcome {
        let friendly_name = format!("{} run @ {}", self.work.name(), format_timestamp(now));

        // A reporting failure must not stop the run itself; the work is
        // simply not bracketed in the platform for this tick.
        let work_id = match self
            .reporter
            .initiate_work(&self.connector_id, &friendly_name)
            .await
        {
            Ok(work_id) => Some(work_id),
            Err(e) => {
                tracing::warn!("Failed to initiate work '{}': {:#}", friendly_name, e);
                None
            }
        };

        if let Err(e) = self.work.run().await {
            metrics::counter!("ConnectorRunFailures").increment(1);

            let e = TickError::Work(e);
            tracing::error!("{}", e);
            return TickOutcome::Failed(e);
        }

        tracing::info!(
            "Connector successfully run, storing last_run as {}",
            now.timestamp()
        );

        if let Err(e) = self.state_store.set_state(RunState { last_run: now }) {
            let e = TickError::Infra(e);
            tracing::error!("{}", e);
            return TickOutcome::Failed(e);
        }

        // Reports the full interval, not the true remaining time; this is
        // the message format the platform's work list already shows.
        let message = format!(
            "Last_run stored, next run in: {:.2} days",
            f64::from(self.config.interval_days())
        );

        if let Some(work_id) = work_id {
            if let Err(e) = self.reporter.to_processed(&work_id, &message).await {
                tracing::warn!("Failed to mark work {:?} as processed: {:#}", work_id, e);
            }
        }

        tracing::info!("{}", message);

        metrics::counter!("ConnectorRuns").increment(1);

        TickOutcome::Ran
    }

    /// Drives the scheduling loop until cancelled.
    ///
    /// Each pass performs one tick and then sleeps for `poll_delay`. A
    /// failed tick never ends the loop; the work is retried once the delay
    /// has passed. Cancellation is only observed between ticks, so an
    /// in-flight tick always completes before the loop exits.
    pub async fn run(&self, poll_delay: StdDuration, shutdown: CancellationToken) {
        tracing::info!(
            "Starting connector loop, checking every {}s for a run due every {} days",
            poll_delay.as_secs(),
            self.config.interval_days()
        );

        while !shutdown.is_cancelled() {
            // Outcomes are already logged inside `tick`
            self.tick(time::now()).await;

            tokio::select! {
                _ = sleep(poll_delay) => {}
                _ = shutdown.cancelled() => break,
            }
        }

        tracing::info!("Connector stop");
    }
}
