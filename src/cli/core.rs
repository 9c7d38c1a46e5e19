use std::io;

use thiserror::Error;

use crate::errors::LedgerError;

pub use crate::errors::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single shell command. Reported, never fatal to the shell.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Unknown command `{0}`")]
    UnknownCommand(String),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

impl CommandError {
    pub(crate) fn usage(usage: &str) -> Self {
        CommandError::InvalidArguments(format!("Usage: {usage}"))
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(err) => CliError::Core(err),
            CommandError::Io(err) => CliError::Io(err),
            CommandError::Dialoguer(err) => CliError::Dialoguer(err),
            other => CliError::Input(other.to_string()),
        }
    }
}
