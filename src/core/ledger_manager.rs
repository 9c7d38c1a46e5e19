use std::path::Path;

use tracing::info;
use uuid::Uuid;

use crate::{
    config::Config,
    core::{
        services::{
            BudgetService, CategoryExpense, DailyBalance, ExportService, LedgerSummary, Streak,
            StreakService, SummaryService,
        },
        time::{Clock, SystemClock},
    },
    errors::Result,
    ledger::{BudgetStatus, BudgetWarning, Ledger, Transaction, TransactionKind, DEFAULT_CATEGORY},
    storage::{JsonFileStore, Store},
};

/// Result of recording a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    pub transaction: Transaction,
    pub warning: Option<BudgetWarning>,
}

/// Session object owning the ledger state, its store and the clock.
///
/// Every mutation is validated, applied, then persisted. When the save fails
/// the in-memory state is rolled back so memory and storage never diverge.
pub struct LedgerManager {
    ledger: Ledger,
    store: Store,
    clock: Box<dyn Clock>,
    default_category: String,
}

impl LedgerManager {
    pub fn new(store: Store, clock: Box<dyn Clock>) -> Self {
        let ledger = store.load();
        Self {
            ledger,
            store,
            clock,
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Opens the JSON-backed ledger in the configured data directory.
    pub fn open(config: &Config, base: &Path) -> Result<Self> {
        let backend = JsonFileStore::new(config.resolve_data_dir(base))?;
        info!(path = %backend.root().display(), "opening ledger");
        Ok(Self::new(Store::new(Box::new(backend)), Box::new(SystemClock))
            .with_default_category(&config.default_category))
    }

    pub fn with_default_category(mut self, category: &str) -> Self {
        self.set_default_category(category);
        self
    }

    /// Category used when a transaction is added without one. Blank input is ignored.
    pub fn set_default_category(&mut self, category: &str) {
        let category = category.trim();
        if !category.is_empty() {
            self.default_category = category.to_string();
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    pub fn add_transaction(
        &mut self,
        description: &str,
        amount: f64,
        kind: TransactionKind,
        category: Option<&str>,
    ) -> Result<AddOutcome> {
        let category = category
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(self.default_category.as_str())
            .to_string();
        let now = self.clock.now();
        let transaction = self.commit(|ledger| {
            ledger.add_transaction(description, amount, kind, &category, now)
        })?;
        info!(
            id = %transaction.id,
            amount,
            kind = %kind,
            category = %transaction.category,
            "transaction added"
        );
        let warning = BudgetService::check_budget(&self.ledger, &transaction.category);
        Ok(AddOutcome {
            transaction,
            warning,
        })
    }

    /// Records an expense whose description is the category name.
    pub fn quick_add(&mut self, category: &str, amount: f64) -> Result<AddOutcome> {
        self.add_transaction(category, amount, TransactionKind::Expense, Some(category))
    }

    /// Removes the transaction with `id`. Unknown ids are a no-op.
    pub fn delete_transaction(&mut self, id: Uuid) -> Result<Option<Transaction>> {
        if self.ledger.transaction(id).is_none() {
            return Ok(None);
        }
        let removed = self.commit(|ledger| Ok(ledger.remove_transaction(id)))?;
        info!(%id, "transaction deleted");
        Ok(removed)
    }

    /// Removes by position in canonical order. Out-of-range positions are a no-op.
    pub fn delete_at(&mut self, index: usize) -> Result<Option<Transaction>> {
        match self.ledger.transactions().get(index) {
            Some(txn) => {
                let id = txn.id;
                self.delete_transaction(id)
            }
            None => Ok(None),
        }
    }

    /// Sets a category limit and re-checks every budget.
    pub fn set_budget(&mut self, category: &str, limit: f64) -> Result<Vec<BudgetWarning>> {
        self.commit(|ledger| ledger.set_budget(category, limit))?;
        info!(category = category.trim(), limit, "budget set");
        Ok(self.check_all_budgets())
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.commit(|ledger| {
            ledger.clear();
            Ok(())
        })?;
        info!("ledger cleared");
        Ok(())
    }

    pub fn search(&self, query: &str) -> Vec<&Transaction> {
        self.ledger.search(query)
    }

    pub fn check_budget(&self, category: &str) -> Option<BudgetWarning> {
        BudgetService::check_budget(&self.ledger, category)
    }

    pub fn check_all_budgets(&self) -> Vec<BudgetWarning> {
        BudgetService::check_all_budgets(&self.ledger)
    }

    pub fn budget_statuses(&self) -> Vec<BudgetStatus> {
        BudgetService::budget_statuses(&self.ledger)
    }

    pub fn total_balance(&self) -> f64 {
        SummaryService::total_balance(&self.ledger)
    }

    pub fn daily_balances(&self) -> Vec<DailyBalance> {
        SummaryService::daily_balances(&self.ledger)
    }

    pub fn category_expense_sums(&self) -> Vec<CategoryExpense> {
        SummaryService::category_expense_sums(&self.ledger)
    }

    pub fn streak(&self) -> Streak {
        StreakService::compute(self.ledger.transactions(), self.clock.today())
    }

    pub fn summary(&self) -> LedgerSummary {
        SummaryService::summarize(&self.ledger, self.clock.today())
    }

    pub fn export_csv(&self, path: &Path) -> Result<()> {
        ExportService::write_csv(self.ledger.transactions(), path)
    }

    fn commit<T, F>(&mut self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut Ledger) -> Result<T>,
    {
        let snapshot = self.ledger.clone();
        let value = match mutate(&mut self.ledger) {
            Ok(value) => value,
            Err(err) => {
                self.ledger = snapshot;
                return Err(err);
            }
        };
        if let Err(err) = self.store.save(&self.ledger) {
            self.ledger = snapshot;
            return Err(err);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::time::FixedClock, errors::LedgerError, storage::MemoryStore};
    use chrono::{TimeZone, Utc};

    fn manager_with(backend: MemoryStore) -> LedgerManager {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 7, 4, 15, 0, 0).unwrap());
        LedgerManager::new(Store::new(Box::new(backend)), Box::new(clock))
    }

    #[test]
    fn add_persists_and_reloads() {
        let backend = MemoryStore::default();
        let mut manager = manager_with(backend.clone());
        manager
            .add_transaction("Coffee", 3.0, TransactionKind::Expense, Some("Food"))
            .unwrap();

        let reopened = manager_with(backend);
        assert_eq!(reopened.transactions(), manager.transactions());
    }

    #[test]
    fn invalid_input_leaves_state_untouched() {
        let mut manager = manager_with(MemoryStore::default());
        let err = manager
            .add_transaction("food", f64::NAN, TransactionKind::Expense, None)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidTransactionInput(_)));
        assert!(manager.transactions().is_empty());
    }

    #[test]
    fn failed_save_rolls_back() {
        let backend = MemoryStore::default();
        let mut manager = manager_with(backend.clone());
        manager
            .add_transaction("Rent", 800.0, TransactionKind::Expense, Some("Housing"))
            .unwrap();
        backend.set_read_only(true);

        let err = manager
            .add_transaction("Pizza", 20.0, TransactionKind::Expense, Some("Food"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert_eq!(manager.transactions().len(), 1);
        assert!(manager.clear_all().is_err());
        assert_eq!(manager.transactions().len(), 1);
    }

    #[test]
    fn add_then_delete_restores_total() {
        let mut manager = manager_with(MemoryStore::default());
        manager
            .add_transaction("Salary", 1200.0, TransactionKind::Income, Some("Work"))
            .unwrap();
        let before = manager.total_balance();
        let outcome = manager
            .add_transaction("Shoes", 80.25, TransactionKind::Expense, Some("Clothes"))
            .unwrap();
        manager.delete_transaction(outcome.transaction.id).unwrap();
        assert_eq!(manager.total_balance(), before);
    }

    #[test]
    fn quick_add_uses_category_as_description() {
        let mut manager = manager_with(MemoryStore::default());
        let outcome = manager.quick_add("Transport", 2.75).unwrap();
        assert_eq!(outcome.transaction.description, "Transport");
        assert_eq!(outcome.transaction.category, "Transport");
        assert_eq!(outcome.transaction.kind, TransactionKind::Expense);
    }

    #[test]
    fn missing_category_uses_configured_default() {
        let mut manager =
            manager_with(MemoryStore::default()).with_default_category("Uncategorized");
        let outcome = manager
            .add_transaction("Thing", 1.0, TransactionKind::Expense, None)
            .unwrap();
        assert_eq!(outcome.transaction.category, "Uncategorized");
    }

    #[test]
    fn budget_warning_surfaces_from_add_and_set_budget() {
        let mut manager = manager_with(MemoryStore::default());
        manager.set_budget("Food", 100.0).unwrap();
        let first = manager
            .add_transaction("Market", 60.0, TransactionKind::Expense, Some("Food"))
            .unwrap();
        assert!(first.warning.is_none());
        let second = manager
            .add_transaction("Dinner", 50.0, TransactionKind::Expense, Some("Food"))
            .unwrap();
        let warning = second.warning.expect("warning expected");
        assert_eq!((warning.spent, warning.limit), (110.0, 100.0));
        assert_eq!(manager.transactions().len(), 2);

        let warnings = manager.set_budget("Food", 105.0).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(manager.set_budget("Food", 200.0).unwrap().is_empty());
    }

    #[test]
    fn deletes_out_of_range_or_unknown_are_no_ops() {
        let mut manager = manager_with(MemoryStore::default());
        manager.quick_add("Food", 5.0).unwrap();
        assert!(manager.delete_at(3).unwrap().is_none());
        assert!(manager.delete_transaction(Uuid::new_v4()).unwrap().is_none());
        assert_eq!(manager.transactions().len(), 1);
        assert!(manager.delete_at(0).unwrap().is_some());
        assert!(manager.transactions().is_empty());
    }

    #[test]
    fn streak_uses_clock() {
        let mut manager = manager_with(MemoryStore::default());
        manager.quick_add("Food", 5.0).unwrap();
        assert_eq!(manager.streak().days, 1);
        assert_eq!(manager.summary().streak.days, 1);
    }

    #[test]
    fn clear_all_empties_everything() {
        let backend = MemoryStore::default();
        let mut manager = manager_with(backend.clone());
        manager.quick_add("Food", 5.0).unwrap();
        manager.set_budget("Food", 50.0).unwrap();
        manager.clear_all().unwrap();
        assert!(manager.ledger().is_empty());
        assert!(manager_with(backend).ledger().is_empty());
    }
}
