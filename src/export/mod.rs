//! Export module
//!
//! Writes the ledger out in two formats:
//! - CSV: one row per transaction (spreadsheet-compatible)
//! - JSON: the full ledger state with export metadata

pub mod csv;
pub mod json;

use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

pub use self::csv::export_transactions_csv;
pub use self::json::{export_ledger_json, LedgerExport, EXPORT_SCHEMA_VERSION};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(LedgerError::Export(format!(
                "Unknown export format '{}' (expected csv or json)",
                other
            ))),
        }
    }
}
