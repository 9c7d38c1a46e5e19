//! CSV export of the canonical transaction sequence.
//!
//! Fields are written raw and unquoted, so a description containing a comma
//! shifts the columns of its row. Amounts use Rust's shortest `f64` display,
//! which never switches to exponent notation: `1e21` is written as
//! `1000000000000000000000` where the browser export wrote `1e+21`. The export
//! is meant for spreadsheets, not for re-import.

use std::{fs, path::Path};

use chrono::SecondsFormat;
use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use crate::{
    errors::{LedgerError, Result},
    ledger::Transaction,
};

pub const CSV_HEADER: [&str; 5] = ["Description", "Amount", "Type", "Category", "Date"];

pub struct ExportService;

impl ExportService {
    pub fn to_csv(transactions: &[Transaction]) -> Result<String> {
        if transactions.is_empty() {
            return Err(LedgerError::InvalidInput(
                "No transactions to export".into(),
            ));
        }
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;
        for txn in transactions {
            let amount = txn.amount.to_string();
            let date = txn.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);
            writer.write_record([
                txn.description.as_str(),
                amount.as_str(),
                txn.kind.as_str(),
                txn.category.as_str(),
                date.as_str(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| LedgerError::Persistence(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| LedgerError::Persistence(err.to_string()))
    }

    pub fn write_csv(transactions: &[Transaction], path: &Path) -> Result<()> {
        let csv = Self::to_csv(transactions)?;
        fs::write(path, csv)?;
        info!(path = %path.display(), rows = transactions.len(), "transactions exported");
        Ok(())
    }
}
