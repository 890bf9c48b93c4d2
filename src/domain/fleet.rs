use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::{Boat, ExpenseOutcome};

/// Sentinel returned by [`Fleet::allowance_left`] when no boat matches.
/// Unambiguous while the `0 <= expenses <= price` invariant holds, since a
/// real allowance can never go negative.
pub const ALLOWANCE_NOT_FOUND: f64 = -1.0;

/// The ordered collection of tracked boats.
///
/// Insertion order is preserved and drives report ordering. Names are not
/// required to be unique: lookups act on the first case-insensitive match,
/// while removal deletes every match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fleet {
    boats: Vec<Boat>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and append each line, silently skipping lines that fail to
    /// parse. Never fails outright; use [`Fleet::add_record`] for per-line
    /// status.
    pub fn load<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.add_record(line.as_ref());
        }
    }

    /// Parse one delimited record and append it. Returns false, mutating
    /// nothing, on any parse failure.
    pub fn add_record(&mut self, line: &str) -> bool {
        match Boat::parse_record(line) {
            Ok(boat) => {
                self.boats.push(boat);
                true
            }
            Err(_) => false,
        }
    }

    /// Append a fully-formed boat (snapshot restore path).
    pub fn add_boat(&mut self, boat: Boat) {
        self.boats.push(boat);
    }

    pub fn exists(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// First case-insensitive name match, in insertion order.
    pub fn find(&self, name: &str) -> Option<&Boat> {
        self.boats
            .iter()
            .find(|boat| boat.name.eq_ignore_ascii_case(name))
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Boat> {
        self.boats
            .iter_mut()
            .find(|boat| boat.name.eq_ignore_ascii_case(name))
    }

    /// Remove every boat whose name matches case-insensitively. Returns
    /// true iff at least one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.boats.len();
        self.boats
            .retain(|boat| !boat.name.eq_ignore_ascii_case(name));
        self.boats.len() < before
    }

    /// Authorize an expense on the first matching boat. `None` when no boat
    /// matches; otherwise the boat's own accept/reject outcome.
    pub fn add_expense(&mut self, name: &str, amount: f64) -> Option<ExpenseOutcome> {
        self.find_mut(name).map(|boat| boat.add_expense(amount))
    }

    /// Remaining allowance for the named boat, or [`ALLOWANCE_NOT_FOUND`]
    /// when no boat matches.
    pub fn allowance_left(&self, name: &str) -> f64 {
        match self.find(name) {
            Some(boat) => boat.allowance_left(),
            None => ALLOWANCE_NOT_FOUND,
        }
    }

    pub fn len(&self) -> usize {
        self.boats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Boat> {
        self.boats.iter()
    }

    pub fn total_price(&self) -> f64 {
        self.boats.iter().map(|boat| boat.price).fold(0.0, |a, b| a + b)
    }

    pub fn total_expenses(&self) -> f64 {
        self.boats.iter().map(|boat| boat.expenses()).fold(0.0, |a, b| a + b)
    }

    /// Render the full fleet report: header, one line per boat in insertion
    /// order, then the paid/spent totals.
    pub fn report(&self) -> String {
        let mut report = String::from("Fleet report:\n");
        for boat in &self.boats {
            report.push_str(&boat.render());
            report.push('\n');
        }
        let _ = writeln!(
            report,
            "Total : Paid $ {:.2} : Spent $ {:.2}",
            self.total_price(),
            self.total_expenses()
        );
        report
    }
}
