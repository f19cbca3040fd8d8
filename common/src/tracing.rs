use std::{env, io::Stdout};

use tokio::task::JoinError;
use tracing_subscriber::{fmt::Layer, prelude::*, EnvFilter};

/// Initializes a new tracing configuration.
///
/// - `rust_log`: Used to set the RUST_LOG environment variable if it is not provided.
///   You can set the default log level (e.g. `warn`), but also module-specific levels
///   using comma-separated entries like `warn,connector=debug`.
///
/// Setting `JSON_LOGS` switches the output to JSON, which is what the log
/// ingestion expects in production deployments.
pub fn init_tracing(rust_log: &str) {
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", rust_log);
    }

    if env::var_os("JSON_LOGS").is_some() {
        let layer = Layer::new()
            .with_writer(std::io::stdout as fn() -> Stdout)
            .with_target(true)
            .json()
            .flatten_event(true)
            .with_span_list(false)
            .with_filter(EnvFilter::from_default_env());

        tracing_subscriber::registry().with(layer).init();
    } else {
        let layer = Layer::new()
            .with_writer(std::io::stdout as fn() -> Stdout)
            .with_target(true)
            .with_filter(EnvFilter::from_default_env());

        tracing_subscriber::registry().with(layer).init();
    }
}

/// Logs the exit of a spawned service task, distinguishing a task that
/// finished with an error from one that could not be joined at all.
pub fn log_task_result_exit<T, E>(task_name: &'static str, result: Result<Result<T, E>, JoinError>)
where
    E: std::fmt::Debug,
{
    match result {
        Ok(Ok(_)) => tracing::info!("Task '{}' exited successfully", task_name),
        Ok(Err(e)) => tracing::error!("Failure in '{}' task: {:?}", task_name, e),
        Err(e) => tracing::error!("Failed to join to '{}' task handle: {:?}", task_name, e),
    }
}
