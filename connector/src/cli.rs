use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::Parser;
use reqwest::Url;

/// The number of seconds to wait between scheduling checks
const POLL_DELAY_SECONDS: &str = "60";

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// The identity of this connector, as registered with the intelligence platform
    #[clap(long, env = "CONNECTOR_ID")]
    pub connector_id: String,

    /// The base URL of the intelligence platform's work API
    #[clap(long, env = "CONNECTOR_API_URL")]
    pub api_url: Url,

    /// The number of days to wait between connector runs
    #[clap(long, env = "CONNECTOR_INTERVAL_DAYS")]
    pub interval_days: u32,

    /// Whether a run should update entities that already exist in the platform
    #[clap(long, env = "CONNECTOR_UPDATE_EXISTING_DATA")]
    pub update_existing_data: bool,

    /// A path to the directory the IDS alert logs are read from
    #[clap(long, env = "CONNECTOR_ALERT_LOGS_PATH")]
    pub alert_logs_path: Option<PathBuf>,

    /// A path to the directory where the connector's run state is stored,
    /// will be created if it doesn't already exist.
    #[clap(long, env = "CONNECTOR_STATE_PATH")]
    pub state_path: PathBuf,

    /// The amount of time in seconds to sleep between scheduling checks
    #[clap(long, default_value = POLL_DELAY_SECONDS)]
    pub poll_delay_seconds: NonZeroU32,
}
