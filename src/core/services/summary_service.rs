//! Chart-ready aggregates over the canonical transaction sequence.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::streak_service::{Streak, StreakService};
use crate::ledger::Ledger;

/// Net movement for one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyBalance {
    pub day: NaiveDate,
    pub net: f64,
}

/// Expense total for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryExpense {
    pub category: String,
    pub spent: f64,
}

/// Everything the dashboard shows at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_balance: f64,
    pub daily_balances: Vec<DailyBalance>,
    pub category_expenses: Vec<CategoryExpense>,
    pub streak: Streak,
}

pub struct SummaryService;

impl SummaryService {
    /// Income minus expenses across every transaction.
    pub fn total_balance(ledger: &Ledger) -> f64 {
        ledger
            .transactions()
            .iter()
            .map(|txn| txn.signed_amount())
            .sum()
    }

    /// Net per day, in the order each day is first seen.
    pub fn daily_balances(ledger: &Ledger) -> Vec<DailyBalance> {
        let mut positions: HashMap<NaiveDate, usize> = HashMap::new();
        let mut balances: Vec<DailyBalance> = Vec::new();
        for txn in ledger.transactions() {
            let day = txn.day();
            let index = *positions.entry(day).or_insert_with(|| {
                balances.push(DailyBalance { day, net: 0.0 });
                balances.len() - 1
            });
            balances[index].net += txn.signed_amount();
        }
        debug!(days = balances.len(), "daily balances computed");
        balances
    }

    /// Expense sums for each distinct category, in first-occurrence order.
    ///
    /// Categories that only carry income still appear, with zero spend.
    pub fn category_expense_sums(ledger: &Ledger) -> Vec<CategoryExpense> {
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut sums: Vec<CategoryExpense> = Vec::new();
        for txn in ledger.transactions() {
            let index = *positions.entry(txn.category.as_str()).or_insert_with(|| {
                sums.push(CategoryExpense {
                    category: txn.category.clone(),
                    spent: 0.0,
                });
                sums.len() - 1
            });
            if txn.is_expense() {
                sums[index].spent += txn.amount;
            }
        }
        sums
    }

    pub fn summarize(ledger: &Ledger, today: NaiveDate) -> LedgerSummary {
        LedgerSummary {
            total_balance: Self::total_balance(ledger),
            daily_balances: Self::daily_balances(ledger),
            category_expenses: Self::category_expense_sums(ledger),
            streak: StreakService::compute(ledger.transactions(), today),
        }
    }
}
