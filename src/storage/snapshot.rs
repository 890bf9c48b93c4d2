use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Boat, Fleet};

/// Current snapshot format version. Bump on any structural change; older
/// or newer snapshots are discarded rather than guessed at.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Versioned on-disk snapshot of the whole fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub boats: Vec<Boat>,
}

impl FleetSnapshot {
    pub fn of(fleet: &Fleet) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            boats: fleet.iter().cloned().collect(),
        }
    }

    pub fn into_fleet(self) -> Fleet {
        let mut fleet = Fleet::new();
        for boat in self.boats {
            fleet.add_boat(boat);
        }
        fleet
    }
}

/// Whole-fleet snapshot persistence at a fixed path.
///
/// Load never errors: a missing, unreadable, malformed, or version-mismatched
/// snapshot yields `None` and the caller starts with an empty fleet.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore the fleet from the snapshot file, if a valid one exists.
    pub fn load(&self) -> Option<Fleet> {
        let file = File::open(&self.path).ok()?;
        let snapshot: FleetSnapshot = serde_json::from_reader(BufReader::new(file)).ok()?;
        if snapshot.version != SNAPSHOT_VERSION {
            return None;
        }
        Some(snapshot.into_fleet())
    }

    /// Serialize the fleet to the snapshot file, overwriting any prior
    /// snapshot.
    pub fn save(&self, fleet: &Fleet) -> Result<()> {
        let snapshot = FleetSnapshot::of(fleet);
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create snapshot file {}", self.path.display()))?;
        serde_json::to_writer_pretty(file, &snapshot)
            .with_context(|| format!("Failed to write snapshot to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fleet() -> Fleet {
        let mut fleet = Fleet::new();
        fleet.load([
            "power,Skipjack,2002,Merc,22,22500",
            "sail,Knockabout,1999,Sunfish,13,8500",
        ]);
        fleet.add_expense("Skipjack", 1000.0);
        fleet
    }

    #[test]
    fn test_snapshot_round_trip_preserves_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("fleet.db"));

        let fleet = sample_fleet();
        store.save(&fleet).unwrap();

        let restored = store.load().unwrap();
        assert_eq!(restored.len(), 2);

        let names: Vec<&str> = restored.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Skipjack", "Knockabout"]);
        assert_eq!(restored.find("Skipjack").unwrap().expenses(), 1000.0);
        assert_eq!(restored.find("Knockabout").unwrap().price, 8500.0);
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("nope.db"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_load_corrupt_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.db");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(SnapshotStore::new(&path).load().is_none());
    }

    #[test]
    fn test_load_version_mismatch_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.db");

        let mut snapshot = FleetSnapshot::of(&sample_fleet());
        snapshot.version = SNAPSHOT_VERSION + 1;
        std::fs::write(&path, serde_json::to_string(&snapshot).unwrap()).unwrap();

        assert!(SnapshotStore::new(&path).load().is_none());
    }

    #[test]
    fn test_save_overwrites_prior_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("fleet.db"));

        store.save(&sample_fleet()).unwrap();

        let mut smaller = Fleet::new();
        smaller.add_record("power,Dinghy,2010,Zodiac,10,3000");
        store.save(&smaller).unwrap();

        let restored = store.load().unwrap();
        assert_eq!(restored.len(), 1);
        assert!(restored.exists("Dinghy"));
    }
}
