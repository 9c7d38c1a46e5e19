use chrono::NaiveDate;

use super::{at, expense, income};
use crate::core::services::SummaryService;
use crate::ledger::Ledger;

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    expense(&mut ledger, "Coffee", 4.0, "Food", at(2024, 3, 2, 8));
    income(&mut ledger, "Salary", 1000.0, "Work", at(2024, 3, 1, 9));
    expense(&mut ledger, "Bus", 2.5, "Transport", at(2024, 3, 2, 18));
    expense(&mut ledger, "Lunch", 11.5, "Food", at(2024, 3, 1, 12));
    ledger
}

#[test]
fn total_balance_is_income_minus_expenses() {
    let ledger = sample_ledger();
    assert_eq!(SummaryService::total_balance(&ledger), 1000.0 - 4.0 - 2.5 - 11.5);
}

#[test]
fn daily_balances_follow_first_seen_order() {
    let ledger = sample_ledger();
    let days = SummaryService::daily_balances(&ledger);
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].day, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    assert_eq!(days[0].net, -6.5);
    assert_eq!(days[1].day, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(days[1].net, 988.5);
}

#[test]
fn category_sums_keep_income_only_categories_at_zero() {
    let ledger = sample_ledger();
    let sums = SummaryService::category_expense_sums(&ledger);
    let pairs: Vec<(&str, f64)> = sums
        .iter()
        .map(|entry| (entry.category.as_str(), entry.spent))
        .collect();
    assert_eq!(
        pairs,
        vec![("Food", 15.5), ("Work", 0.0), ("Transport", 2.5)]
    );
}

#[test]
fn summarize_bundles_streak() {
    let ledger = sample_ledger();
    let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
    let summary = SummaryService::summarize(&ledger, today);
    assert_eq!(summary.streak.days, 2);
    assert_eq!(summary.daily_balances.len(), 2);
    assert_eq!(summary.total_balance, SummaryService::total_balance(&ledger));
}

#[test]
fn empty_ledger_summarizes_to_zeroes() {
    let ledger = Ledger::new();
    let summary = SummaryService::summarize(&ledger, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    assert_eq!(summary.total_balance, 0.0);
    assert!(summary.daily_balances.is_empty());
    assert!(summary.category_expenses.is_empty());
    assert_eq!(summary.streak.days, 0);
}
