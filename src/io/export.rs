use std::io::Write;

use anyhow::Result;

use crate::domain::Fleet;

/// Export each boat's immutable fields as CSV, in the same
/// `type,name,year,make,length,price` form the loader accepts. Expense
/// state is not part of the exchange format; it lives in the snapshot.
/// Returns the number of records written.
pub fn export_fleet_csv<W: Write>(fleet: &Fleet, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut count = 0;
    for boat in fleet.iter() {
        csv_writer.write_record(&[
            boat.boat_type.as_str().to_string(),
            boat.name.clone(),
            boat.year.to_string(),
            boat.make.clone(),
            format_number(boat.length),
            format_number(boat.price),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Render a numeric field without a trailing ".0" for whole values, so
/// exported files look like hand-written load files.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
