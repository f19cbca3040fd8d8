use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// file for storing the run state inside the configured state directory
const RUN_STATE_FILE: &str = "connector_state.json";

/// Record of when the gated work last completed successfully.
///
/// Serialized as plain epoch seconds, so the on-disk form is
/// `{"last_run": <seconds>}` and can be inspected or edited by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub last_run: DateTime<Utc>,
}

/// Persistence for the connector's run state. Only ever written after a
/// fully successful run.
pub trait StateStore {
    /// Returns `None` until the connector has completed its first run.
    fn get_state(&self) -> anyhow::Result<Option<RunState>>;

    fn set_state(&self, state: RunState) -> anyhow::Result<()>;
}

/// Stores the run state as a JSON file on local disk.
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Creates a store rooted at `state_path`, creating the directory if
    /// it doesn't already exist.
    pub fn new(state_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        fs::create_dir_all(&state_path)?;

        Ok(Self {
            path: state_path.as_ref().join(RUN_STATE_FILE),
        })
    }
}

impl StateStore for FileStateStore {
    fn get_state(&self) -> anyhow::Result<Option<RunState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let reader = File::open(&self.path)?;
        let state = serde_json::from_reader::<_, RunState>(reader)?;

        Ok(Some(state))
    }

    fn set_state(&self, state: RunState) -> anyhow::Result<()> {
        fs::write(&self.path, serde_json::to_string(&state)?)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn get_state_is_none_before_first_run() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path()).unwrap();

        assert_eq!(store.get_state().unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path()).unwrap();

        let last_run = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        store.set_state(RunState { last_run }).unwrap();

        assert_eq!(store.get_state().unwrap(), Some(RunState { last_run }));
    }

    #[test]
    fn set_state_overwrites_the_previous_run() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path()).unwrap();

        let first = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 6, 8, 12, 30, 0).unwrap();

        store.set_state(RunState { last_run: first }).unwrap();
        store.set_state(RunState { last_run: second }).unwrap();

        assert_eq!(
            store.get_state().unwrap(),
            Some(RunState { last_run: second })
        );
    }

    #[test]
    fn state_file_is_plain_epoch_seconds() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(dir.path()).unwrap();

        let last_run = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        store.set_state(RunState { last_run }).unwrap();

        let contents = fs::read_to_string(dir.path().join(RUN_STATE_FILE)).unwrap();

        assert_eq!(contents, format!("{{\"last_run\":{}}}", last_run.timestamp()));
    }

    #[test]
    fn missing_state_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("state");

        let store = FileStateStore::new(&nested).unwrap();

        assert_eq!(store.get_state().unwrap(), None);
        assert!(nested.is_dir());
    }
}
