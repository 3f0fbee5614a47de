//! Monthly and annual balances
//!
//! Pure projections of the transaction list. Month membership is decided by
//! the calendar date of each timestamp in a given time zone; the plain
//! functions use the process's local zone, the `_in` variants take it
//! explicitly.

use chrono::{Datelike, Local, TimeZone};
use serde::Serialize;

use crate::models::{Money, MonthlyBalance, Transaction, TransactionKind};

/// Does `txn` fall in zero-based `month` of `year` when viewed in `tz`?
pub(crate) fn occurs_in<Tz: TimeZone>(tz: &Tz, txn: &Transaction, month: u32, year: i32) -> bool {
    let local = txn.timestamp.with_timezone(tz);
    local.month0() == month && local.year() == year
}

/// Totals for zero-based `month` (0 = January) of `year`, in time zone `tz`.
///
/// A month outside 0..=11 matches nothing and yields zero totals.
pub fn monthly_balance_in<Tz: TimeZone>(
    tz: &Tz,
    transactions: &[Transaction],
    month: u32,
    year: i32,
) -> MonthlyBalance {
    let mut income = Money::zero();
    let mut expenses = Money::zero();

    for txn in transactions.iter().filter(|t| occurs_in(tz, t, month, year)) {
        match txn.kind {
            TransactionKind::Income => income += txn.amount,
            TransactionKind::Expense => expenses += txn.amount,
        }
    }

    MonthlyBalance::new(month, year, income, expenses)
}

/// Totals for zero-based `month` of `year` in the local time zone
pub fn monthly_balance(transactions: &[Transaction], month: u32, year: i32) -> MonthlyBalance {
    monthly_balance_in(&Local, transactions, month, year)
}

/// Twelve monthly balances for `year`, January first, in time zone `tz`
pub fn annual_balance_in<Tz: TimeZone>(
    tz: &Tz,
    transactions: &[Transaction],
    year: i32,
) -> Vec<MonthlyBalance> {
    (0..12)
        .map(|month| monthly_balance_in(tz, transactions, month, year))
        .collect()
}

/// Twelve monthly balances for `year` in the local time zone
pub fn annual_balance(transactions: &[Transaction], year: i32) -> Vec<MonthlyBalance> {
    annual_balance_in(&Local, transactions, year)
}

/// A year at a glance: every month plus the yearly totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnualReport {
    pub year: i32,
    /// Exactly 12 entries, index == month
    pub months: Vec<MonthlyBalance>,
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_balance: Money,
}

impl AnnualReport {
    /// Generate the report for `year` in the local time zone
    pub fn generate(transactions: &[Transaction], year: i32) -> Self {
        Self::generate_in(&Local, transactions, year)
    }

    /// Generate the report for `year` in time zone `tz`
    pub fn generate_in<Tz: TimeZone>(tz: &Tz, transactions: &[Transaction], year: i32) -> Self {
        let months = annual_balance_in(tz, transactions, year);
        let total_income: Money = months.iter().map(|m| m.income).sum();
        let total_expenses: Money = months.iter().map(|m| m.expenses).sum();

        Self {
            year,
            months,
            total_income,
            total_expenses,
            total_balance: total_income - total_expenses,
        }
    }

    /// Months that had at least one transaction
    pub fn active_months(&self) -> impl Iterator<Item = &MonthlyBalance> {
        self.months.iter().filter(|m| !m.is_empty())
    }
}
