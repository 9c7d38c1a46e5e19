use super::{at, expense, income};
use crate::core::services::BudgetService;
use crate::ledger::Ledger;

#[test]
fn second_expense_pushes_category_over_limit() {
    let mut ledger = Ledger::new();
    ledger.set_budget("Food", 100.0).unwrap();

    expense(&mut ledger, "Groceries", 60.0, "Food", at(2024, 1, 1, 9));
    assert!(BudgetService::check_budget(&ledger, "Food").is_none());

    expense(&mut ledger, "Dinner", 50.0, "Food", at(2024, 1, 2, 19));
    let warning = BudgetService::check_budget(&ledger, "Food").expect("over budget");
    assert_eq!(warning.category, "Food");
    assert_eq!(warning.spent, 110.0);
    assert_eq!(warning.limit, 100.0);
    assert_eq!(warning.overspend(), 10.0);
}

#[test]
fn spend_under_or_at_limit_is_quiet() {
    let mut ledger = Ledger::new();
    ledger.set_budget("Food", 100.0).unwrap();
    expense(&mut ledger, "Groceries", 90.0, "Food", at(2024, 1, 1, 9));
    assert!(BudgetService::check_budget(&ledger, "Food").is_none());

    expense(&mut ledger, "Snack", 10.0, "Food", at(2024, 1, 1, 10));
    assert!(BudgetService::check_budget(&ledger, "Food").is_none());
}

#[test]
fn income_does_not_count_toward_spend() {
    let mut ledger = Ledger::new();
    ledger.set_budget("Food", 20.0).unwrap();
    income(&mut ledger, "Refund", 500.0, "Food", at(2024, 1, 1, 9));
    expense(&mut ledger, "Lunch", 15.0, "Food", at(2024, 1, 1, 12));
    assert_eq!(BudgetService::category_spend(&ledger, "Food"), 15.0);
    assert!(BudgetService::check_budget(&ledger, "Food").is_none());
}

#[test]
fn unconfigured_category_never_warns() {
    let mut ledger = Ledger::new();
    expense(&mut ledger, "TV", 2000.0, "Electronics", at(2024, 1, 1, 9));
    assert!(BudgetService::check_budget(&ledger, "Electronics").is_none());
    assert!(BudgetService::check_all_budgets(&ledger).is_empty());
}

#[test]
fn check_all_budgets_reports_each_exceeded_category() {
    let mut ledger = Ledger::new();
    ledger.set_budget("Food", 10.0).unwrap();
    ledger.set_budget("Fun", 10.0).unwrap();
    ledger.set_budget("Travel", 500.0).unwrap();
    expense(&mut ledger, "Pizza", 12.0, "Food", at(2024, 1, 1, 9));
    expense(&mut ledger, "Cinema", 25.0, "Fun", at(2024, 1, 1, 20));
    expense(&mut ledger, "Bus", 3.0, "Travel", at(2024, 1, 1, 8));

    let categories: Vec<String> = BudgetService::check_all_budgets(&ledger)
        .into_iter()
        .map(|warning| warning.category)
        .collect();
    assert_eq!(categories, vec!["Food".to_string(), "Fun".to_string()]);
}

#[test]
fn statuses_cover_limits_without_spending() {
    let mut ledger = Ledger::new();
    ledger.set_budget("Savings", 300.0).unwrap();
    ledger.set_budget("Food", 100.0).unwrap();
    expense(&mut ledger, "Market", 40.0, "Food", at(2024, 1, 1, 9));

    let statuses = BudgetService::budget_statuses(&ledger);
    assert_eq!(statuses.len(), 2);
    let food = &statuses[0];
    assert_eq!(food.category, "Food");
    assert_eq!(food.remaining, 60.0);
    assert!(!food.exceeded);
    assert!((food.utilization_percent() - 40.0).abs() < f64::EPSILON);
    assert_eq!(statuses[1].spent, 0.0);
}
