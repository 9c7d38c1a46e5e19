//! Command shell over [`crate::core::LedgerManager`].

pub mod commands;
pub mod core;
pub mod output;
pub mod registry;
pub mod shell;
pub mod shell_context;

pub use self::core::{CliMode, CommandError, CommandResult};
pub use shell::run_cli;
pub use shell_context::ShellContext;
