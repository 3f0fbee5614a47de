//! Transaction display formatting
//!
//! Table and detail views of individual transactions.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::{truncate, DisplayOptions};
use crate::models::Transaction;
use crate::reports::HistoryTotals;

const DESCRIPTION_WIDTH: usize = 32;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, options: &DisplayOptions) -> Self {
        Self {
            id: txn.id.short(),
            date: options.date(txn.timestamp),
            kind: txn.kind.to_string(),
            description: truncate(&txn.description, DESCRIPTION_WIDTH),
            amount: options.money(txn.signed_amount()),
        }
    }
}

/// Format transactions as a table, in the order given
pub fn format_transaction_table(transactions: &[Transaction], options: &DisplayOptions) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows = transactions.iter().map(|t| TransactionRow::new(t, options));

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(4), Alignment::right());

    table.to_string()
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, options: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Short ID:    {}\n", txn.id.short()));
    output.push_str(&format!("Date:        {}\n", options.date(txn.timestamp)));
    output.push_str(&format!("Kind:        {}\n", txn.kind));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!("Amount:      {}\n", options.money(txn.amount)));

    output
}

/// One-line summary under a filtered listing
pub fn format_history_totals(totals: &HistoryTotals, options: &DisplayOptions) -> String {
    format!(
        "{} transaction(s)  income {}  expenses {}  net {}",
        totals.count,
        options.money(totals.income),
        options.money(totals.expenses),
        options.money(totals.balance)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use chrono::{TimeZone, Utc};

    fn sample(desc: &str, cents: i64, kind: TransactionKind) -> Transaction {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        Transaction::new(desc, Money::from_cents(cents), kind, at).unwrap()
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            format_transaction_table(&[], &DisplayOptions::default()),
            "No transactions found."
        );
    }

    #[test]
    fn test_table_shows_signed_amounts() {
        let salary = sample("Salary", 100000, TransactionKind::Income);
        let rent = sample("Rent", 40000, TransactionKind::Expense);

        let output =
            format_transaction_table(&[salary.clone(), rent], &DisplayOptions::default());

        assert!(output.contains("Description"));
        assert!(output.contains("Salary"));
        assert!(output.contains("$1000.00"));
        assert!(output.contains("-$400.00"));
        assert!(output.contains(&salary.id.short()));
        assert!(output.contains("2024-03-15"));
    }

    #[test]
    fn test_details() {
        let txn = sample("Coffee", 350, TransactionKind::Expense);
        let output = format_transaction_details(&txn, &DisplayOptions::default());

        assert!(output.contains(&txn.id.to_string()));
        assert!(output.contains("Kind:        Expense"));
        assert!(output.contains("Amount:      $3.50"));
    }

    #[test]
    fn test_totals_line() {
        let transactions = vec![
            sample("Salary", 100000, TransactionKind::Income),
            sample("Rent", 40000, TransactionKind::Expense),
        ];
        let totals = HistoryTotals::from_transactions(&transactions);

        assert_eq!(
            format_history_totals(&totals, &DisplayOptions::default()),
            "2 transaction(s)  income $1000.00  expenses $400.00  net $600.00"
        );
    }
}
