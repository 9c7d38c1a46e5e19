//! Consecutive-day logging streak.

use std::{collections::BTreeSet, fmt};

use chrono::NaiveDate;
use serde::Serialize;

use crate::ledger::Transaction;

/// Number of consecutive calendar days, ending today, with at least one transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub days: u32,
}

impl Streak {
    pub fn label(&self) -> &'static str {
        if self.days == 1 {
            "day"
        } else {
            "days"
        }
    }
}

impl fmt::Display for Streak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.days, self.label())
    }
}

pub struct StreakService;

impl StreakService {
    /// Walks back from `today` one calendar day at a time while each day has an entry.
    ///
    /// Several transactions on one day count once, and entries dated after
    /// `today` are ignored. The input slice is only read.
    pub fn compute(transactions: &[Transaction], today: NaiveDate) -> Streak {
        let days: BTreeSet<NaiveDate> = transactions
            .iter()
            .map(Transaction::day)
            .filter(|day| *day <= today)
            .collect();

        let mut streak = 0u32;
        let mut cursor = Some(today);
        while let Some(day) = cursor {
            if !days.contains(&day) {
                break;
            }
            streak += 1;
            cursor = day.pred_opt();
        }
        Streak { days: streak }
    }
}
