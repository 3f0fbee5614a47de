//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the ledger service. Text from the command line
//! is parsed into typed values here, before it reaches the ledger.

pub mod balance;
pub mod export;
pub mod report;
pub mod transaction;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, TransactionKind};
use crate::notify::{Notification, NotificationKind, Notifier};

pub use balance::{handle_balance_command, BalanceCommands};
pub use export::{handle_export_command, ExportArgs};
pub use report::{handle_report_command, handle_years_command, ReportCommands};
pub use transaction::{
    handle_add_command, handle_clear_command, handle_list_command, handle_recent_command,
    handle_remove_command, AddArgs, ListArgs,
};

/// Prints ledger notifications: successes to stdout, errors to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Error => eprintln!("{}", notification),
            _ => println!("{}", notification),
        }
    }
}

/// Parse a transaction amount: a decimal with at most two places, > 0
pub fn parse_amount(text: &str) -> LedgerResult<Money> {
    Ok(Money::parse_positive(text)?)
}

/// Parse an initial balance, any sign
pub fn parse_balance(text: &str) -> LedgerResult<Money> {
    Ok(Money::parse(text)?)
}

pub fn parse_kind(text: &str) -> LedgerResult<TransactionKind> {
    TransactionKind::parse(text).ok_or_else(|| {
        LedgerError::invalid(format!(
            "Unknown transaction kind '{}' (expected income or expense)",
            text.trim()
        ))
    })
}

/// Convert a 1-12 month from the command line to the zero-based index
pub fn parse_month(month: u32) -> LedgerResult<u32> {
    if (1..=12).contains(&month) {
        Ok(month - 1)
    } else {
        Err(LedgerError::invalid(format!(
            "Month must be between 1 and 12, got {}",
            month
        )))
    }
}

/// Turn a `YYYY-MM-DD` date into a timestamp at local noon
pub fn parse_date(text: &str) -> LedgerResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::invalid(format!("Invalid date '{}' (expected YYYY-MM-DD)", text.trim()))
    })?;

    let noon = date
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| LedgerError::invalid(format!("Invalid date '{}'", text.trim())))?;

    Local
        .from_local_datetime(&noon)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            LedgerError::invalid(format!("Date '{}' does not exist locally", text.trim()))
        })
}

/// Current local year and zero-based month
pub fn current_period() -> (i32, u32) {
    let now = Local::now();
    (now.year(), now.month0())
}
