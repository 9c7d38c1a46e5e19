use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use super::{
    budget::BudgetMap,
    transaction::{is_valid_amount, Transaction, TransactionKind, DEFAULT_CATEGORY},
};
use crate::errors::{LedgerError, Result};

/// In-memory ledger state: the canonical transaction sequence plus budget limits.
///
/// Canonical order is insertion order. Nothing in this type reorders it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    budgets: BudgetMap,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(transactions: Vec<Transaction>, budgets: BudgetMap) -> Self {
        Self {
            transactions,
            budgets,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &BudgetMap {
        &self.budgets
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.budgets.is_empty()
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Validates and appends a transaction stamped with `timestamp`.
    ///
    /// An empty category falls back to [`DEFAULT_CATEGORY`].
    pub fn add_transaction(
        &mut self,
        description: &str,
        amount: f64,
        kind: TransactionKind,
        category: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Transaction> {
        let description = description.trim();
        if description.is_empty() {
            return Err(LedgerError::InvalidTransactionInput(
                "description must not be empty".into(),
            ));
        }
        if !is_valid_amount(amount) {
            return Err(LedgerError::InvalidTransactionInput(format!(
                "amount must be a positive number, got {amount}"
            )));
        }
        let category = match category.trim() {
            "" => DEFAULT_CATEGORY,
            trimmed => trimmed,
        };
        let txn = Transaction::new(description, amount, kind, category, timestamp);
        debug!(id = %txn.id, category = %txn.category, "transaction appended");
        self.transactions.push(txn.clone());
        Ok(txn)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }

    /// Removes by position in canonical order; out-of-range positions are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Transaction> {
        if index < self.transactions.len() {
            Some(self.transactions.remove(index))
        } else {
            None
        }
    }

    /// Sets or overwrites a category limit, returning the previous limit.
    pub fn set_budget(&mut self, category: &str, limit: f64) -> Result<Option<f64>> {
        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::InvalidBudgetInput(
                "category must not be empty".into(),
            ));
        }
        if !is_valid_amount(limit) {
            return Err(LedgerError::InvalidBudgetInput(format!(
                "limit must be a positive number, got {limit}"
            )));
        }
        Ok(self.budgets.insert(category.to_string(), limit))
    }

    pub fn budget_for(&self, category: &str) -> Option<f64> {
        self.budgets.get(category).copied()
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
        self.budgets.clear();
    }

    /// Transactions whose description or category contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Transaction> {
        let needle = query.trim().to_lowercase();
        self.transactions
            .iter()
            .filter(|txn| txn.matches(&needle))
            .collect()
    }
}
