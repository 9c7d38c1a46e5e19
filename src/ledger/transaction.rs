use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

pub const DEFAULT_CATEGORY: &str = "Other";

/// A single recorded money movement.
///
/// Field names on disk follow the browser ledger layout (`desc`, `type`,
/// `date`) so existing `transactions` records load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "desc")]
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            timestamp,
        }
    }

    /// Signed contribution to the balance: positive for income, negative for expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Calendar day of the timestamp in UTC.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// True when the record satisfies the rules enforced on insert: a
    /// non-blank description and a finite positive amount.
    pub fn is_well_formed(&self) -> bool {
        !self.description.trim().is_empty() && is_valid_amount(self.amount)
    }

    /// Case-insensitive substring match against the description or category.
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.description.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TransactionKind::Income),
            "expense" | "out" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::InvalidTransactionInput(format!(
                "unknown transaction type `{other}` (expected income or expense)"
            ))),
        }
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Returns true for finite amounts strictly greater than zero.
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}
