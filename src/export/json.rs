//! JSON export
//!
//! Exports the full ledger state with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{LedgerState, Money, Transaction};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub initial_balance: Money,

    /// Current balance at export time, for reference only
    pub current_balance: Money,

    /// All transactions, insertion order
    pub transactions: Vec<Transaction>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,

    /// Earliest transaction timestamp
    pub earliest_transaction: Option<DateTime<Utc>>,

    /// Latest transaction timestamp
    pub latest_transaction: Option<DateTime<Utc>>,
}

impl LedgerExport {
    /// Snapshot the given ledger state
    pub fn from_state(state: &LedgerState) -> Self {
        let metadata = ExportMetadata {
            transaction_count: state.transactions.len(),
            earliest_transaction: state.transactions.iter().map(|t| t.timestamp).min(),
            latest_transaction: state.transactions.iter().map(|t| t.timestamp).max(),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            initial_balance: state.initial_balance,
            current_balance: state.current_balance(),
            transactions: state.transactions.clone(),
            metadata,
        }
    }
}

/// Export the full ledger to JSON
pub fn export_ledger_json<W: Write>(
    state: &LedgerState,
    writer: W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = LedgerExport::from_state(state);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::TimeZone;

    fn sample_state() -> LedgerState {
        let mut state = LedgerState::with_initial_balance(Money::from_cents(2500));
        state.transactions.push(
            Transaction::new(
                "Salary",
                Money::from_cents(100000),
                TransactionKind::Income,
                Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            )
            .unwrap(),
        );
        state.transactions.push(
            Transaction::new(
                "Rent",
                Money::from_cents(40000),
                TransactionKind::Expense,
                Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
            )
            .unwrap(),
        );
        state
    }

    #[test]
    fn test_export_contents() {
        let state = sample_state();
        let mut output = Vec::new();
        export_ledger_json(&state, &mut output, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["initial_balance"], 2500);
        assert_eq!(value["current_balance"], 62500);
        assert_eq!(value["metadata"]["transaction_count"], 2);
        assert_eq!(
            value["metadata"]["earliest_transaction"],
            "2024-03-01T09:00:00Z"
        );
    }

    #[test]
    fn test_compact_export_is_single_line() {
        let mut output = Vec::new();
        export_ledger_json(&sample_state(), &mut output, false).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(!text.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["transactions"].as_array().unwrap().len(), 2);
        assert_eq!(value["transactions"][1]["description"], "Rent");
    }
}
