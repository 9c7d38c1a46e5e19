pub mod budget_service;
pub mod export_service;
pub mod streak_service;
pub mod summary_service;

pub use budget_service::BudgetService;
pub use export_service::ExportService;
pub use streak_service::{Streak, StreakService};
pub use summary_service::{CategoryExpense, DailyBalance, LedgerSummary, SummaryService};

#[cfg(test)]
mod tests;
