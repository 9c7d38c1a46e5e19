//! Persistence boundary between the in-memory [`Ledger`] and durable key-value storage.

pub mod json_backend;
pub mod memory;

use tracing::{info, warn};

use crate::{
    errors::{LedgerError, Result},
    ledger::{transaction::is_valid_amount, BudgetMap, Ledger, Transaction},
};

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const BUDGETS_KEY: &str = "budgets";

/// Durable string key/value storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Commits every entry or none of them.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<()>;

    fn set(&self, key: &str, value: String) -> Result<()> {
        self.set_many(&[(key, value)])
    }
}

/// Loads and saves the `transactions` and `budgets` records.
pub struct Store {
    backend: Box<dyn KeyValueStore>,
}

impl Store {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()))
    }

    /// Reads both records. Missing or unreadable records start empty, and
    /// entries that break the insert rules are dropped with a warning.
    pub fn load(&self) -> Ledger {
        let mut transactions: Vec<Transaction> = self.read_record(TRANSACTIONS_KEY);
        transactions.retain(|txn| {
            let keep = txn.is_well_formed();
            if !keep {
                warn!(
                    id = %txn.id,
                    amount = txn.amount,
                    "dropping malformed transaction record"
                );
            }
            keep
        });
        let mut budgets: BudgetMap = self.read_record(BUDGETS_KEY);
        budgets.retain(|category, limit| {
            let keep = !category.trim().is_empty() && is_valid_amount(*limit);
            if !keep {
                warn!(category = %category, limit = *limit, "dropping malformed budget limit");
            }
            keep
        });
        info!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            "ledger loaded"
        );
        Ledger::from_parts(transactions, budgets)
    }

    /// Serializes both records and commits them together.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let transactions = serde_json::to_string(ledger.transactions())?;
        let budgets = serde_json::to_string(ledger.budgets())?;
        self.backend
            .set_many(&[(TRANSACTIONS_KEY, transactions), (BUDGETS_KEY, budgets)])
            .map_err(|err| match err {
                LedgerError::Persistence(_) => err,
                other => LedgerError::Persistence(other.to_string()),
            })?;
        info!(
            transactions = ledger.transactions().len(),
            budgets = ledger.budgets().len(),
            "ledger saved"
        );
        Ok(())
    }

    fn read_record<T>(&self, key: &str) -> T
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(err) => {
                warn!(key, error = %err, "failed to read record, starting empty");
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "failed to parse record, starting empty");
                T::default()
            }
        }
    }
}
