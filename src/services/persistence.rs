//! Snapshot persistence in a directory-backed key-value slot

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Fixed key of the stopwatch snapshot slot
pub const SNAPSHOT_KEY: &str = "stopwatchState";

/// Persisted stopwatch state
///
/// Older snapshots may carry a `lapsHTML` field; it is ignored; the lap list
/// is always rebuilt from `lapTimes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    pub elapsed_time: u64,
    /// Index the next lap will receive
    pub lap_number: u32,
    pub lap_times: Vec<u64>,
    pub is_running: bool,
    /// Epoch milliseconds at which the snapshot was taken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<u64>,
}

impl PersistedSnapshot {
    /// Reject snapshots that describe an impossible state
    pub fn validate(&self) -> Result<(), PersistenceError> {
        let expected = u32::try_from(self.lap_times.len())
            .ok()
            .and_then(|count| count.checked_add(1));
        if expected != Some(self.lap_number) {
            return Err(PersistenceError::Invalid(format!(
                "lapNumber {} does not follow {} recorded laps",
                self.lap_number,
                self.lap_times.len()
            )));
        }
        let lap_total = self
            .lap_times
            .iter()
            .try_fold(0u64, |acc, &lap| acc.checked_add(lap))
            .ok_or_else(|| PersistenceError::Invalid("lap times overflow".to_string()))?;
        if lap_total > self.elapsed_time {
            return Err(PersistenceError::Invalid(format!(
                "lap times sum to {}ms but only {}ms elapsed",
                lap_total, self.elapsed_time
            )));
        }
        Ok(())
    }
}

/// Durable slot holding at most one snapshot
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the slot file
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", SNAPSHOT_KEY))
    }

    /// Overwrite the slot with `snapshot`
    pub fn save(&self, snapshot: &PersistedSnapshot) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec(snapshot)?;
        fs::write(&tmp, body).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error(&path, e))?;

        debug!(
            "Saved snapshot: elapsed={}ms laps={} running={}",
            snapshot.elapsed_time,
            snapshot.lap_times.len(),
            snapshot.is_running
        );
        Ok(())
    }

    /// Read the slot; `Ok(None)` when nothing has been saved
    ///
    /// Content is parsed but not checked for consistency; see
    /// [`PersistedSnapshot::validate`].
    pub fn load(&self) -> Result<Option<PersistedSnapshot>, PersistenceError> {
        let path = self.path();
        let body = match fs::read(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, e)),
        };

        Ok(Some(serde_json::from_slice(&body)?))
    }

    /// Remove the slot; clearing an empty slot succeeds
    pub fn clear(&self) -> Result<(), PersistenceError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Cleared snapshot at {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> PersistenceError {
    PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PersistedSnapshot {
        PersistedSnapshot {
            elapsed_time: 2_500,
            lap_number: 3,
            lap_times: vec![1_000, 1_200],
            is_running: false,
            saved_at: Some(42),
        }
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());

        assert_eq!(store.load().unwrap(), None);
        store.save(&snapshot()).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot()));
        assert!(store.path().ends_with("stopwatchState.json"));
    }

    #[test]
    fn test_clear_removes_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        store.save(&snapshot()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["elapsedTime"], 2_500);
        assert_eq!(json["lapNumber"], 3);
        assert_eq!(json["lapTimes"][1], 1_200);
        assert_eq!(json["isRunning"], false);
        assert!(json.get("lapsHTML").is_none());
    }

    #[test]
    fn test_legacy_snapshot_with_markup_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        let legacy = r#"{"elapsedTime":1500,"lapNumber":2,"lapTimes":[700],
            "lapsHTML":"<li><span>Lap 1:</span> 00:00:00:70</li>","isRunning":true}"#;
        fs::write(store.path(), legacy).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.lap_times, vec![700]);
        assert!(loaded.is_running);
        assert_eq!(loaded.saved_at, None);
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path());
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(PersistenceError::Malformed(_))));
    }

    #[test]
    fn test_inconsistent_snapshot_is_invalid() {
        let mut bad = snapshot();
        bad.lap_times = vec![2_000, 2_000];
        assert!(matches!(bad.validate(), Err(PersistenceError::Invalid(_))));

        let mut bad = snapshot();
        bad.lap_number = 0;
        assert!(matches!(bad.validate(), Err(PersistenceError::Invalid(_))));
    }

    #[test]
    fn test_lap_number_must_follow_lap_count() {
        let mut gapped = snapshot();
        gapped.lap_number = 9;
        assert!(matches!(gapped.validate(), Err(PersistenceError::Invalid(_))));

        let exhausted = PersistedSnapshot {
            elapsed_time: 1_000,
            lap_number: u32::MAX,
            lap_times: vec![],
            is_running: true,
            saved_at: None,
        };
        assert!(matches!(exhausted.validate(), Err(PersistenceError::Invalid(_))));

        assert!(snapshot().validate().is_ok());
    }
}
