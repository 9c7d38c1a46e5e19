//! Ledger domain models and the in-memory ledger state.

pub mod budget;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use budget::{BudgetMap, BudgetStatus, BudgetWarning};
pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionKind, DEFAULT_CATEGORY};
