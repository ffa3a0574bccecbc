use sea_orm::DbErr;
use thiserror::Error;

/// Reasons why stored turn numbers do not form the permutation `1..=N`.
///
/// Positions refer to storage order, starting at zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidNumbering {
    #[error("participant at position {position} has no number")]
    Missing { position: usize },
    #[error("participant at position {position} has invalid number {raw:?}")]
    NotAPositiveInteger { position: usize, raw: String },
    #[error("participant at position {position} has number {number}, but only {count} participants exist")]
    OutOfRange { position: usize, number: u32, count: usize },
    #[error("number {number} is assigned more than once")]
    Duplicate { number: u32 },
    #[error("expected {expected} numbers for the roster, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("No participants found")]
    EmptyRoster,
    #[error("Invalid numbering: {0}")]
    InvalidState(#[from] InvalidNumbering),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    #[error("Roster file error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RosterError {
    /// Storage failures are the only errors a front-end cannot recover from.
    pub fn is_fatal(&self) -> bool {
        match self {
            RosterError::InvalidInput(_) | RosterError::EmptyRoster | RosterError::InvalidState(_) => false,
            RosterError::Database(_) | RosterError::Csv(_) | RosterError::Io(_) => true,
        }
    }
}
