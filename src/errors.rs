use std::result::Result as StdResult;

use thiserror::Error;

/// Error type that captures every ledger failure surfaced to callers.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid transaction: {0}")]
    InvalidTransactionInput(String),
    #[error("Invalid budget: {0}")]
    InvalidBudgetInput(String),
    #[error("Position {index} is out of range (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        LedgerError::Persistence(err.to_string())
    }
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
