use thiserror::Error;

/// Configuration rejected at construction time. Fatal: the connector
/// never enters its loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("run interval must be at least 1 day, got {0}")]
    IntervalTooShort(u32),
}

/// A failure confined to a single tick. The loop logs it and tries again
/// after the poll delay.
#[derive(Debug, Error)]
pub enum TickError {
    /// The gated work itself failed. The stored state is left untouched so
    /// the next due tick repeats the same run.
    #[error("connector work failed: {0:#}")]
    Work(anyhow::Error),
    /// The state store failed, either reading the last run or recording a
    /// new one.
    #[error("state store failed: {0:#}")]
    Infra(anyhow::Error),
}
