//! Compares category spend against configured limits.

use tracing::warn;

use crate::ledger::{BudgetStatus, BudgetWarning, Ledger};

/// Stateless budgeting utilities that operate over [`Ledger`] snapshots.
pub struct BudgetService;

impl BudgetService {
    /// Total expense-only spend for `category` across all transactions.
    pub fn category_spend(ledger: &Ledger, category: &str) -> f64 {
        ledger
            .transactions()
            .iter()
            .filter(|txn| txn.is_expense() && txn.category == category)
            .map(|txn| txn.amount)
            .sum()
    }

    /// Returns a warning when `category` has a limit and spend is strictly above it.
    pub fn check_budget(ledger: &Ledger, category: &str) -> Option<BudgetWarning> {
        let limit = ledger.budget_for(category)?;
        let spent = Self::category_spend(ledger, category);
        if spent > limit {
            warn!(category, spent, limit, "budget exceeded");
            Some(BudgetWarning {
                category: category.to_string(),
                spent,
                limit,
            })
        } else {
            None
        }
    }

    /// Runs [`Self::check_budget`] for every category with a configured limit.
    pub fn check_all_budgets(ledger: &Ledger) -> Vec<BudgetWarning> {
        ledger
            .budgets()
            .keys()
            .filter_map(|category| Self::check_budget(ledger, category))
            .collect()
    }

    /// One status row per configured limit, in category order.
    pub fn budget_statuses(ledger: &Ledger) -> Vec<BudgetStatus> {
        ledger
            .budgets()
            .iter()
            .map(|(category, limit)| {
                BudgetStatus::new(
                    category.clone(),
                    *limit,
                    Self::category_spend(ledger, category),
                )
            })
            .collect()
    }
}
