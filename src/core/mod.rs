pub mod ledger_manager;
pub mod services;
pub mod time;
pub mod utils;

pub use ledger_manager::{AddOutcome, LedgerManager};
pub use time::{Clock, FixedClock, SystemClock};
