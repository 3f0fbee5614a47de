//! CSV export
//!
//! Exports transactions in insertion order, one row each. Amounts are plain
//! decimals so spreadsheets can sum them; `signed_amount` carries the sign.

use std::io::Write;

use chrono::SecondsFormat;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;

#[derive(Serialize)]
struct CsvRow<'a> {
    id: String,
    timestamp: String,
    kind: &'a str,
    description: &'a str,
    amount: String,
    signed_amount: String,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            id: txn.id.to_string(),
            timestamp: txn.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            kind: if txn.is_income() { "income" } else { "expense" },
            description: &txn.description,
            amount: txn.amount.to_decimal_string(),
            signed_amount: txn.signed_amount().to_decimal_string(),
        }
    }
}

/// Export all transactions to CSV, header included
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if transactions.is_empty() {
        csv_writer
            .write_record(["id", "timestamp", "kind", "description", "amount", "signed_amount"])
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    for txn in transactions {
        csv_writer
            .serialize(CsvRow::from(txn))
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}
