use std::fs::File;
use std::path::Path;

use anyhow::Context;

use crate::domain::{Boat, ExpenseOutcome, Fleet};
use crate::io::{import_fleet_csv, ImportResult};
use crate::storage::SnapshotStore;

use super::AppError;

/// Application service providing high-level fleet operations.
/// This is the primary interface for any client (CLI, TUI, etc.).
pub struct FleetService {
    fleet: Fleet,
    store: SnapshotStore,
}

impl FleetService {
    /// Start with an empty fleet, ignoring any existing snapshot. Used when
    /// the fleet is about to be seeded from a CSV file.
    pub fn with_empty(store: SnapshotStore) -> Self {
        Self {
            fleet: Fleet::new(),
            store,
        }
    }

    /// Restore the fleet from the snapshot store, falling back to an empty
    /// fleet. The bool reports whether a snapshot was actually restored.
    pub fn restore(store: SnapshotStore) -> (Self, bool) {
        match store.load() {
            Some(fleet) => (Self { fleet, store }, true),
            None => (Self::with_empty(store), false),
        }
    }

    /// Bulk-load boat records from a CSV file, appending to the fleet.
    pub fn load_csv_path(&mut self, path: impl AsRef<Path>) -> Result<ImportResult, AppError> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open CSV file {}", path.display()))?;
        Ok(import_fleet_csv(&mut self.fleet, file)?)
    }

    /// Parse one CSV record and add the boat to the fleet.
    pub fn add_record(&mut self, line: &str) -> Result<(), AppError> {
        let boat = Boat::parse_record(line)?;
        self.fleet.add_boat(boat);
        Ok(())
    }

    /// Remove every boat matching the name, case-insensitively.
    pub fn remove_boat(&mut self, name: &str) -> Result<(), AppError> {
        if self.fleet.remove(name) {
            Ok(())
        } else {
            Err(AppError::BoatNotFound(name.to_string()))
        }
    }

    /// Authorize an expense on the named boat. Returns the boat's new
    /// cumulative expense total on acceptance.
    pub fn add_expense(&mut self, name: &str, amount: f64) -> Result<f64, AppError> {
        match self.fleet.add_expense(name, amount) {
            None => Err(AppError::BoatNotFound(name.to_string())),
            Some(ExpenseOutcome::Accepted { new_total }) => Ok(new_total),
            Some(ExpenseOutcome::Rejected { allowance_left }) => {
                Err(AppError::ExpenseNotPermitted { allowance_left })
            }
        }
    }

    /// Remaining allowance for the named boat.
    pub fn allowance_left(&self, name: &str) -> Result<f64, AppError> {
        self.fleet
            .find(name)
            .map(|boat| boat.allowance_left())
            .ok_or_else(|| AppError::BoatNotFound(name.to_string()))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.fleet.exists(name)
    }

    pub fn report(&self) -> String {
        self.fleet.report()
    }

    /// Snapshot the whole fleet to durable storage, overwriting any prior
    /// snapshot.
    pub fn save(&self) -> Result<(), AppError> {
        Ok(self.store.save(&self.fleet)?)
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }
}
