#![allow(dead_code)]

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use pocket_ledger::{
    core::FixedClock,
    storage::{JsonFileStore, KeyValueStore, MemoryStore, Store},
    LedgerManager,
};

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Manager over a shared in-memory store, pinned to `now`.
pub fn memory_manager(store: &MemoryStore, now: DateTime<Utc>) -> LedgerManager {
    manager_over(Box::new(store.clone()), now)
}

/// Manager over JSON files under `dir`, pinned to `now`.
pub fn json_manager(dir: &Path, now: DateTime<Utc>) -> LedgerManager {
    let backend = JsonFileStore::new(dir.to_path_buf()).expect("create json store");
    manager_over(Box::new(backend), now)
}

fn manager_over(backend: Box<dyn KeyValueStore>, now: DateTime<Utc>) -> LedgerManager {
    LedgerManager::new(Store::new(backend), Box::new(FixedClock(now)))
}
