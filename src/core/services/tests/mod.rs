mod budget_service_tests;
mod export_service_tests;
mod summary_service_tests;

use chrono::{DateTime, TimeZone, Utc};

use crate::ledger::{Ledger, TransactionKind};

pub(super) fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

pub(super) fn expense(
    ledger: &mut Ledger,
    desc: &str,
    amount: f64,
    category: &str,
    when: DateTime<Utc>,
) {
    ledger
        .add_transaction(desc, amount, TransactionKind::Expense, category, when)
        .expect("valid expense");
}

pub(super) fn income(
    ledger: &mut Ledger,
    desc: &str,
    amount: f64,
    category: &str,
    when: DateTime<Utc>,
) {
    ledger
        .add_transaction(desc, amount, TransactionKind::Income, category, when)
        .expect("valid income");
}
