use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-category spending ceilings keyed by category name.
pub type BudgetMap = BTreeMap<String, f64>;

/// Raised when expense spend in a category goes past its configured limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetWarning {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
}

impl BudgetWarning {
    pub fn overspend(&self) -> f64 {
        self.spent - self.limit
    }
}

/// Spend against a single configured limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
    pub exceeded: bool,
}

impl BudgetStatus {
    pub fn new(category: impl Into<String>, limit: f64, spent: f64) -> Self {
        Self {
            category: category.into(),
            limit,
            spent,
            remaining: limit - spent,
            exceeded: spent > limit,
        }
    }

    /// Share of the limit already spent, as a percentage.
    pub fn utilization_percent(&self) -> f64 {
        if self.limit > 0.0 {
            self.spent / self.limit * 100.0
        } else {
            0.0
        }
    }
}
