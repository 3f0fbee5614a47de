//! Display formatting for terminal output
//!
//! Turns ledger data and report values into text for the CLI. Nothing here
//! computes balances; it only lays out what the reports module returns.

pub mod report;
pub mod transaction;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use tracing::warn;

use crate::config::Settings;
use crate::models::Money;

pub use report::{
    format_annual_report, format_balance_summary, format_breakdown, format_monthly_balance,
    format_percentage, format_years,
};
pub use transaction::{format_history_totals, format_transaction_details, format_transaction_table};

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Currency and date preferences applied to every formatted value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl DisplayOptions {
    /// Take the preferences from user settings.
    ///
    /// An unparseable date format falls back to ISO dates instead of
    /// failing every listing.
    pub fn from_settings(settings: &Settings) -> Self {
        let date_format = if is_valid_date_format(&settings.date_format) {
            settings.date_format.clone()
        } else {
            warn!(format = %settings.date_format, "invalid date format in settings, using default");
            DEFAULT_DATE_FORMAT.to_string()
        };

        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format,
        }
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Format a timestamp as a calendar date in local time
    pub fn date(&self, timestamp: DateTime<Utc>) -> String {
        timestamp
            .with_timezone(&Local)
            .format(&self.date_format)
            .to_string()
    }
}

fn is_valid_date_format(format: &str) -> bool {
    !format.is_empty() && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// Truncate to `max_chars` characters, marking the cut with "..."
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        ".".repeat(max_chars)
    } else {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", kept)
    }
}
