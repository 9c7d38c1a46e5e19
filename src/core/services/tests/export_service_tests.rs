use super::{at, expense, income};
use crate::core::services::ExportService;
use crate::errors::LedgerError;
use crate::ledger::Ledger;

#[test]
fn csv_has_header_and_raw_rows() {
    let mut ledger = Ledger::new();
    expense(&mut ledger, "Coffee", 3.5, "Food", at(2024, 4, 1, 8));
    income(&mut ledger, "Salary", 2000.0, "Work", at(2024, 4, 1, 9));

    let csv = ExportService::to_csv(ledger.transactions()).expect("export");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Description,Amount,Type,Category,Date",
            "Coffee,3.5,expense,Food,2024-04-01T08:00:00.000Z",
            "Salary,2000,income,Work,2024-04-01T09:00:00.000Z",
        ]
    );
}

#[test]
fn embedded_commas_are_not_quoted() {
    let mut ledger = Ledger::new();
    expense(&mut ledger, "Eggs, milk", 6.0, "Food", at(2024, 4, 1, 8));
    let csv = ExportService::to_csv(ledger.transactions()).unwrap();
    assert!(csv.contains("\nEggs, milk,6,expense,Food,"));
}

#[test]
fn empty_ledger_cannot_be_exported() {
    let err = ExportService::to_csv(&[]).expect_err("nothing to export");
    assert!(matches!(err, LedgerError::InvalidInput(_)));
}

#[test]
fn write_csv_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let mut ledger = Ledger::new();
    expense(&mut ledger, "Tea", 2.0, "Food", at(2024, 4, 1, 8));
    ExportService::write_csv(ledger.transactions(), &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("Description,Amount,Type,Category,Date\n"));
}

#[test]
fn large_amounts_are_written_without_exponent() {
    let mut ledger = Ledger::new();
    income(&mut ledger, "Windfall", 1e21, "Luck", at(2024, 4, 1, 8));
    let csv = ExportService::to_csv(ledger.transactions()).unwrap();
    assert!(csv.contains("\nWindfall,1000000000000000000000,income,Luck,"));
}
