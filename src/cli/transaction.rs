//! Transaction CLI commands
//!
//! Add, remove, clear and list transactions.

use clap::Args;

use super::{current_period, parse_amount, parse_date, parse_kind, parse_month};
use crate::display::{
    format_history_totals, format_transaction_details, format_transaction_table, DisplayOptions,
};
use crate::error::{LedgerError, LedgerResult};
use crate::reports::{history, recent, HistoryFilter, HistoryTotals};
use crate::services::Ledger;
use crate::storage::KeyValueStore;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// income or expense
    pub kind: String,
    /// What the money was for
    pub description: String,
    /// Positive amount (e.g. "42.50")
    #[arg(allow_hyphen_values = true)]
    pub amount: String,
    /// Date the transaction occurred (YYYY-MM-DD), defaults to now
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Arguments for `list`
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only descriptions containing this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
    /// income or expense
    #[arg(short, long)]
    pub kind: Option<String>,
    /// Calendar year
    #[arg(short, long)]
    pub year: Option<i32>,
    /// Month 1-12 (of --year, or the current year)
    #[arg(short, long)]
    pub month: Option<u32>,
    /// Number of transactions to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    fn to_filter(&self) -> LedgerResult<HistoryFilter> {
        let mut filter = HistoryFilter::new();

        if let Some(search) = &self.search {
            filter = filter.search(search.clone());
        }
        if let Some(kind) = &self.kind {
            filter = filter.kind(parse_kind(kind)?);
        }

        let year = self.year.unwrap_or_else(|| current_period().0);
        filter = match self.month {
            Some(month) => filter.month(parse_month(month)?, year),
            None if self.year.is_some() => filter.year(year),
            None => filter,
        };

        if let Some(limit) = self.limit {
            filter = filter.limit(limit);
        }

        Ok(filter)
    }
}

/// Handle `add`
pub fn handle_add_command<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    options: &DisplayOptions,
    args: AddArgs,
) -> LedgerResult<()> {
    let kind = parse_kind(&args.kind)?;
    let amount = parse_amount(&args.amount)?;

    let txn = match args.date.as_deref() {
        Some(date) => ledger.add_transaction_at(&args.description, amount, kind, parse_date(date)?)?,
        None => ledger.add_transaction(&args.description, amount, kind)?,
    };

    print!("{}", format_transaction_details(&txn, options));
    println!("Balance:     {}", options.money(ledger.current_balance()));

    Ok(())
}

/// Handle `remove`
///
/// An id that matches nothing is reported but is not an error.
pub fn handle_remove_command<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    options: &DisplayOptions,
    reference: &str,
) -> LedgerResult<()> {
    let Some(id) = ledger.resolve(reference)? else {
        println!("No transaction matches '{}'; nothing removed.", reference.trim());
        return Ok(());
    };

    ledger.remove_transaction(id)?;
    println!("Balance: {}", options.money(ledger.current_balance()));

    Ok(())
}

/// Handle `clear`
pub fn handle_clear_command<S: KeyValueStore>(
    ledger: &mut Ledger<S>,
    options: &DisplayOptions,
    confirmed: bool,
) -> LedgerResult<()> {
    let count = ledger.transactions().len();

    if !confirmed {
        return Err(LedgerError::invalid(format!(
            "Refusing to remove {} transaction(s) without --yes",
            count
        )));
    }

    let removed = ledger.clear_all()?;
    println!(
        "Removed {} transaction(s). Balance: {}",
        removed,
        options.money(ledger.current_balance())
    );

    Ok(())
}

/// Handle `list`
pub fn handle_list_command<S: KeyValueStore>(
    ledger: &Ledger<S>,
    options: &DisplayOptions,
    args: &ListArgs,
) -> LedgerResult<()> {
    let filter = args.to_filter()?;
    let transactions = history(ledger.transactions(), &filter);

    println!("{}", format_transaction_table(&transactions, options));
    if !transactions.is_empty() {
        let totals = HistoryTotals::from_transactions(&transactions);
        println!("{}", format_history_totals(&totals, options));
    }

    Ok(())
}

/// Handle `recent`
pub fn handle_recent_command<S: KeyValueStore>(
    ledger: &Ledger<S>,
    options: &DisplayOptions,
    count: usize,
) -> LedgerResult<()> {
    let transactions = recent(ledger.transactions(), count);
    println!("{}", format_transaction_table(&transactions, options));
    Ok(())
}
