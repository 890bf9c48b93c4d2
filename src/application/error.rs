use thiserror::Error;

use crate::domain::ParseRecordError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cannot find boat {0}")]
    BoatNotFound(String),

    #[error("Expense not permitted, only ${allowance_left:.2} left to spend.")]
    ExpenseNotPermitted { allowance_left: f64 },

    #[error("Invalid boat record: {0}")]
    InvalidRecord(#[from] ParseRecordError),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
