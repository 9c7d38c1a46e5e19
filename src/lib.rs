#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger records income and expense transactions, aggregates them into
//! chart-ready series, watches per-category budget limits and tracks a daily
//! logging streak. State lives in a local key-value store.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{AddOutcome, LedgerManager};
pub use errors::{LedgerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!(
            version = env!("CARGO_PKG_VERSION"),
            "pocket_ledger tracing initialized"
        );
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
