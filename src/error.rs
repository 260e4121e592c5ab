use std::io;
use thiserror::Error;

/// Anything that can go wrong between reading the payroll files and writing the report.
#[derive(Debug, Error)]
pub enum PayrollError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not convert string to number: field '{field}' has value '{value}'")]
    InvalidAmount { field: String, value: String },
    #[error("amount overflow while computing {0}")]
    Overflow(&'static str),
}

pub type Result<T> = std::result::Result<T, PayrollError>;
