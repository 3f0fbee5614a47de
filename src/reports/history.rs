//! Transaction history views
//!
//! Filtering, newest-first ordering and totals over the filtered set. The
//! ledger keeps transactions in insertion order; every view here re-sorts by
//! timestamp.

use chrono::{Datelike, Local, TimeZone};
use serde::Serialize;

use crate::models::{Money, Transaction, TransactionKind};

use super::balance::occurs_in;

/// Options for filtering the transaction history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    pub kind: Option<TransactionKind>,
    pub year: Option<i32>,
    /// Zero-based month; only meaningful together with `year`
    pub month: Option<u32>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl HistoryFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by description text
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Filter by kind
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filter by calendar year
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Filter by zero-based month of the given year
    pub fn month(mut self, month: u32, year: i32) -> Self {
        self.month = Some(month);
        self.year = Some(year);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches<Tz: TimeZone>(&self, tz: &Tz, txn: &Transaction, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            if !txn.description.to_lowercase().contains(needle) {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }

        match (self.year, self.month) {
            (Some(year), Some(month)) => occurs_in(tz, txn, month, year),
            (Some(year), None) => txn.timestamp.with_timezone(tz).year() == year,
            _ => true,
        }
    }
}

/// Sort newest first; equal timestamps keep insertion order
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Transactions matching `filter`, newest first, with dates judged in `tz`
pub fn history_in<Tz: TimeZone>(
    tz: &Tz,
    transactions: &[Transaction],
    filter: &HistoryFilter,
) -> Vec<Transaction> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(tz, t, needle.as_deref()))
        .cloned()
        .collect();

    sort_newest_first(&mut matched);

    if let Some(limit) = filter.limit {
        matched.truncate(limit);
    }

    matched
}

/// Transactions matching `filter`, newest first, in the local time zone
pub fn history(transactions: &[Transaction], filter: &HistoryFilter) -> Vec<Transaction> {
    history_in(&Local, transactions, filter)
}

/// The `count` most recent transactions
pub fn recent(transactions: &[Transaction], count: usize) -> Vec<Transaction> {
    history_in(&Local, transactions, &HistoryFilter::new().limit(count))
}

/// Distinct years that have transactions, newest first.
///
/// `current_year` is always included so a fresh ledger still offers a year
/// to look at.
pub fn years_with_data_in<Tz: TimeZone>(
    tz: &Tz,
    transactions: &[Transaction],
    current_year: i32,
) -> Vec<i32> {
    let mut years: Vec<i32> = transactions
        .iter()
        .map(|t| t.timestamp.with_timezone(tz).year())
        .chain(std::iter::once(current_year))
        .collect();

    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Distinct years with transactions in the local time zone, newest first
pub fn years_with_data(transactions: &[Transaction], current_year: i32) -> Vec<i32> {
    years_with_data_in(&Local, transactions, current_year)
}

/// Income, expense and net totals of a set of transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistoryTotals {
    pub income: Money,
    pub expenses: Money,
    pub balance: Money,
    pub count: usize,
}

impl HistoryTotals {
    /// Sum the given transactions by kind
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let income: Money = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let expenses: Money = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        Self {
            income,
            expenses,
            balance: income - expenses,
            count: transactions.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, Utc};

    fn local_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn txn(desc: &str, cents: i64, kind: TransactionKind, at: DateTime<Utc>) -> Transaction {
        Transaction::new(desc, Money::from_cents(cents), kind, at).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("Salary", 300000, TransactionKind::Income, local_noon(2024, 1, 5)),
            txn("Supermarket", 25000, TransactionKind::Expense, local_noon(2024, 1, 12)),
            txn("Rent", 120000, TransactionKind::Expense, local_noon(2024, 2, 1)),
            txn("Salary", 300000, TransactionKind::Income, local_noon(2024, 2, 5)),
            txn("supermarket run", 8000, TransactionKind::Expense, local_noon(2023, 12, 30)),
        ]
    }

    #[test]
    fn test_unfiltered_is_newest_first() {
        let result = history(&sample(), &HistoryFilter::new());

        assert_eq!(result.len(), 5);
        for pair in result.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
        assert_eq!(result[0].description, "Salary");
        assert_eq!(result[4].description, "supermarket run");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let result = history(&sample(), &HistoryFilter::new().search("SUPER"));
        assert_eq!(result.len(), 2);

        let blank = history(&sample(), &HistoryFilter::new().search("   "));
        assert_eq!(blank.len(), 5);
    }

    #[test]
    fn test_kind_year_and_month_filters() {
        let transactions = sample();

        let expenses_2024 = history(
            &transactions,
            &HistoryFilter::new().kind(TransactionKind::Expense).year(2024),
        );
        assert_eq!(expenses_2024.len(), 2);

        let february = history(&transactions, &HistoryFilter::new().month(1, 2024));
        assert_eq!(february.len(), 2);
        assert!(february.iter().all(|t| t.timestamp >= local_noon(2024, 2, 1)));
    }

    #[test]
    fn test_limit_and_recent() {
        let transactions = sample();
        let top = history(&transactions, &HistoryFilter::new().limit(2));
        assert_eq!(top.len(), 2);

        let latest = recent(&transactions, 3);
        assert_eq!(latest.len(), 3);
        assert_eq!(latest[0].timestamp, local_noon(2024, 2, 5));

        assert_eq!(recent(&transactions, 50).len(), 5);
    }

    #[test]
    fn test_totals_over_filtered_set() {
        let filtered = history(&sample(), &HistoryFilter::new().year(2024));
        let totals = HistoryTotals::from_transactions(&filtered);

        assert_eq!(totals.count, 4);
        assert_eq!(totals.income.cents(), 600000);
        assert_eq!(totals.expenses.cents(), 145000);
        assert_eq!(totals.balance.cents(), 455000);
    }

    #[test]
    fn test_years_with_data() {
        let transactions = sample();
        assert_eq!(years_with_data(&transactions, 2024), vec![2024, 2023]);
        assert_eq!(years_with_data(&transactions, 2026), vec![2026, 2024, 2023]);
        assert_eq!(years_with_data(&[], 2026), vec![2026]);
    }

    #[test]
    fn test_year_filter_respects_time_zone() {
        let at = Utc.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap();
        let transactions = vec![txn("Fireworks", 5000, TransactionKind::Expense, at)];
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        assert_eq!(
            history_in(&tokyo, &transactions, &HistoryFilter::new().year(2024)).len(),
            1
        );
        assert_eq!(years_with_data_in(&tokyo, &transactions, 2024), vec![2024]);
    }
}
