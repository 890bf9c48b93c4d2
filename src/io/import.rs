use std::io::{BufRead, BufReader, Read};

use anyhow::Result;

use crate::domain::{Boat, Fleet};

/// Result of a bulk import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred on one line during import
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub error: String,
}

/// Bulk-load boat records from CSV text, appending each parsed boat to the
/// fleet. Malformed lines are skipped and accounted per line; blank lines
/// are ignored. Fails only when the input itself cannot be read.
pub fn import_fleet_csv<R: Read>(fleet: &mut Fleet, reader: R) -> Result<ImportResult> {
    let mut imported = 0;
    let mut skipped = 0;
    let mut errors = Vec::new();

    for (line_num, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match Boat::parse_record(&line) {
            Ok(boat) => {
                fleet.add_boat(boat);
                imported += 1;
            }
            Err(err) => {
                skipped += 1;
                errors.push(ImportError {
                    line: line_num + 1,
                    error: err.to_string(),
                });
            }
        }
    }

    Ok(ImportResult {
        imported,
        skipped,
        errors,
    })
}
