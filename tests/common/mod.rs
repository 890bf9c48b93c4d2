// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use flotilla::application::FleetService;
use flotilla::storage::SnapshotStore;
use tempfile::TempDir;

/// Helper to create a test service with a temporary snapshot path
pub fn test_service() -> Result<(FleetService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let store = SnapshotStore::new(temp_dir.path().join("fleet.db"));
    Ok((FleetService::with_empty(store), temp_dir))
}

/// Test fixture: the standard two-boat fleet
pub struct StandardFleet;

impl StandardFleet {
    pub const RECORDS: [&'static str; 2] = [
        "power,Skipjack,2002,Merc,22,22500",
        "sail,Knockabout,1999,Sunfish,13,8500",
    ];

    pub fn seed(service: &mut FleetService) -> Result<()> {
        for record in Self::RECORDS {
            service.add_record(record)?;
        }
        Ok(())
    }
}
