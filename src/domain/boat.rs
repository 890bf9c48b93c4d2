use std::fmt;

use serde::{Deserialize, Serialize};

/// The number of comma-separated fields in a boat record:
/// type, name, year, make, length, price.
pub const RECORD_FIELDS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoatType {
    /// Sail-driven boats
    Sailing,
    /// Motor-driven boats
    Power,
}

impl BoatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoatType::Sailing => "sailing",
            BoatType::Power => "power",
        }
    }

    /// Parse a type tag, case-insensitively. `"POWER"`, `"Power"` and
    /// `"power"` all match; `"sail"` is accepted as shorthand for sailing.
    pub fn from_tag(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sailing" | "sail" => Some(BoatType::Sailing),
            "power" => Some(BoatType::Power),
            _ => None,
        }
    }
}

impl fmt::Display for BoatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Outcome of an expense authorization on a single boat.
///
/// Replaces the dual-meaning "new total or remaining allowance" float with
/// two explicit variants carrying the same information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpenseOutcome {
    /// The expense was applied; this is the boat's new cumulative total.
    Accepted { new_total: f64 },
    /// The expense exceeded the remaining allowance; nothing changed.
    Rejected { allowance_left: f64 },
}

impl ExpenseOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ExpenseOutcome::Accepted { .. })
    }
}

/// A single boat: immutable identity plus a cumulative expense total that
/// may only grow, bounded by the purchase price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    pub boat_type: BoatType,
    pub name: String,
    pub year: i32,
    pub make: String,
    pub length: f64,
    pub price: f64,
    expenses: f64,
}

impl Boat {
    /// Create a new boat with no expenses recorded.
    pub fn new(
        boat_type: BoatType,
        name: impl Into<String>,
        year: i32,
        make: impl Into<String>,
        length: f64,
        price: f64,
    ) -> Self {
        Self {
            boat_type,
            name: name.into(),
            year,
            make: make.into(),
            length,
            price,
            expenses: 0.0,
        }
    }

    /// Parse one comma-delimited record: `type,name,year,make,length,price`.
    pub fn parse_record(line: &str) -> Result<Self, ParseRecordError> {
        let fields: Vec<&str> = line.trim().split(',').collect();
        if fields.len() != RECORD_FIELDS {
            return Err(ParseRecordError::WrongFieldCount(fields.len()));
        }

        let boat_type = BoatType::from_tag(fields[0].trim())
            .ok_or_else(|| ParseRecordError::UnknownType(fields[0].trim().to_string()))?;
        let year = parse_numeric_field::<i32>("year", fields[2])?;
        let length = parse_numeric_field::<f64>("length", fields[4])?;
        let price = parse_numeric_field::<f64>("price", fields[5])?;

        Ok(Boat::new(
            boat_type,
            fields[1].trim(),
            year,
            fields[3].trim(),
            length,
            price,
        ))
    }

    pub fn expenses(&self) -> f64 {
        self.expenses
    }

    /// Remaining spending room: purchase price minus cumulative expenses.
    pub fn allowance_left(&self) -> f64 {
        self.price - self.expenses
    }

    /// Authorize an expense against the remaining allowance.
    ///
    /// The amount is applied only if it fits within `allowance_left`;
    /// otherwise the boat is left untouched and the rejection reports how
    /// much room remains. Callers are expected to pass `amount >= 0`.
    pub fn add_expense(&mut self, amount: f64) -> ExpenseOutcome {
        let allowance_left = self.allowance_left();
        if amount <= allowance_left {
            self.expenses += amount;
            ExpenseOutcome::Accepted {
                new_total: self.expenses,
            }
        } else {
            ExpenseOutcome::Rejected { allowance_left }
        }
    }

    /// Fixed-width report line, suitable for tabular display.
    pub fn render(&self) -> String {
        format!(
            "{:<8} {:<20} {:4} {:<12} {:3.0}' : Paid $ {:8.2} : Spent $ {:8.2}",
            self.boat_type, self.name, self.year, self.make, self.length, self.price, self.expenses
        )
    }
}

fn parse_numeric_field<T: std::str::FromStr>(
    field: &'static str,
    value: &str,
) -> Result<T, ParseRecordError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseRecordError::InvalidNumber {
            field,
            value: value.trim().to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseRecordError {
    WrongFieldCount(usize),
    UnknownType(String),
    InvalidNumber { field: &'static str, value: String },
}

impl fmt::Display for ParseRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseRecordError::WrongFieldCount(n) => {
                write!(f, "expected {} fields, got {}", RECORD_FIELDS, n)
            }
            ParseRecordError::UnknownType(tag) => write!(f, "unknown boat type '{}'", tag),
            ParseRecordError::InvalidNumber { field, value } => {
                write!(f, "invalid {} '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ParseRecordError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boat_type_tag_roundtrip() {
        for bt in [BoatType::Sailing, BoatType::Power] {
            let parsed = BoatType::from_tag(bt.as_str()).unwrap();
            assert_eq!(bt, parsed);
        }
    }

    #[test]
    fn test_boat_type_tag_case_insensitive() {
        assert_eq!(BoatType::from_tag("POWER"), Some(BoatType::Power));
        assert_eq!(BoatType::from_tag("Sailing"), Some(BoatType::Sailing));
        assert_eq!(BoatType::from_tag("SAIL"), Some(BoatType::Sailing));
        assert_eq!(BoatType::from_tag("canoe"), None);
    }

    #[test]
    fn test_new_boat_has_no_expenses() {
        let boat = Boat::new(BoatType::Power, "Skipjack", 2002, "Merc", 22.0, 22500.0);
        assert_eq!(boat.expenses(), 0.0);
        assert_eq!(boat.allowance_left(), 22500.0);
    }

    #[test]
    fn test_add_expense_within_allowance() {
        let mut boat = Boat::new(BoatType::Power, "Skipjack", 2002, "Merc", 22.0, 22500.0);
        let outcome = boat.add_expense(1000.0);
        assert_eq!(outcome, ExpenseOutcome::Accepted { new_total: 1000.0 });
        assert_eq!(boat.expenses(), 1000.0);
    }

    #[test]
    fn test_add_expense_over_allowance_leaves_state_unchanged() {
        let mut boat = Boat::new(BoatType::Power, "Skipjack", 2002, "Merc", 22.0, 22500.0);
        boat.add_expense(1000.0);

        let outcome = boat.add_expense(22000.0);
        assert_eq!(
            outcome,
            ExpenseOutcome::Rejected {
                allowance_left: 21500.0
            }
        );
        assert_eq!(boat.expenses(), 1000.0);
    }

    #[test]
    fn test_add_expense_exact_allowance_is_accepted() {
        let mut boat = Boat::new(BoatType::Sailing, "Knockabout", 1999, "Sunfish", 13.0, 8500.0);
        let outcome = boat.add_expense(8500.0);
        assert!(outcome.is_accepted());
        assert_eq!(boat.expenses(), 8500.0);
        assert_eq!(boat.allowance_left(), 0.0);
    }

    #[test]
    fn test_parse_record() {
        let boat = Boat::parse_record("power,Skipjack,2002,Merc,22,22500").unwrap();
        assert_eq!(boat.boat_type, BoatType::Power);
        assert_eq!(boat.name, "Skipjack");
        assert_eq!(boat.year, 2002);
        assert_eq!(boat.make, "Merc");
        assert_eq!(boat.length, 22.0);
        assert_eq!(boat.price, 22500.0);
        assert_eq!(boat.expenses(), 0.0);
    }

    #[test]
    fn test_parse_record_wrong_field_count() {
        assert_eq!(
            Boat::parse_record("power,Skipjack,2002,Merc,22"),
            Err(ParseRecordError::WrongFieldCount(5))
        );
        assert_eq!(
            Boat::parse_record(""),
            Err(ParseRecordError::WrongFieldCount(1))
        );
    }

    #[test]
    fn test_parse_record_unknown_type() {
        assert_eq!(
            Boat::parse_record("canoe,Skipjack,2002,Merc,22,22500"),
            Err(ParseRecordError::UnknownType("canoe".to_string()))
        );
    }

    #[test]
    fn test_parse_record_invalid_numbers() {
        assert!(matches!(
            Boat::parse_record("power,Skipjack,year,Merc,22,22500"),
            Err(ParseRecordError::InvalidNumber { field: "year", .. })
        ));
        assert!(matches!(
            Boat::parse_record("power,Skipjack,2002,Merc,long,22500"),
            Err(ParseRecordError::InvalidNumber {
                field: "length",
                ..
            })
        ));
        assert!(matches!(
            Boat::parse_record("power,Skipjack,2002,Merc,22,cheap"),
            Err(ParseRecordError::InvalidNumber { field: "price", .. })
        ));
    }

    #[test]
    fn test_render_layout() {
        let mut boat = Boat::new(BoatType::Power, "Skipjack", 2002, "Merc", 22.0, 22500.0);
        boat.add_expense(1000.0);
        assert_eq!(
            boat.render(),
            "power    Skipjack             2002 Merc          22' : Paid $ 22500.00 : Spent $  1000.00"
        );
    }
}
