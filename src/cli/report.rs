//! CLI commands for reports
//!
//! Month and year balance reports and the list of years with data.

use clap::Subcommand;

use super::{current_period, parse_month};
use crate::display::{
    format_annual_report, format_breakdown, format_monthly_balance, format_years, DisplayOptions,
};
use crate::error::LedgerResult;
use crate::reports::{description_breakdown, years_with_data, AnnualReport};
use crate::services::Ledger;
use crate::storage::KeyValueStore;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expenses and balance for one month, by description
    Month {
        /// Month 1-12, defaults to the current month
        #[arg(short, long)]
        month: Option<u32>,
        /// Year, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// All twelve months of a year with yearly totals
    #[command(alias = "annual")]
    Year {
        /// Year, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
    },
}

/// Handle a report command
pub fn handle_report_command<S: KeyValueStore>(
    ledger: &Ledger<S>,
    options: &DisplayOptions,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let (current_year, current_month) = current_period();

    match cmd {
        ReportCommands::Month { month, year } => {
            let month = match month {
                Some(m) => parse_month(m)?,
                None => current_month,
            };
            let year = year.unwrap_or(current_year);

            let balance = ledger.monthly_balance(month, year);
            print!("{}", format_monthly_balance(&balance, options));
            println!();

            let breakdown = description_breakdown(ledger.transactions(), month, year);
            println!("{}", format_breakdown(&breakdown, options));
        }
        ReportCommands::Year { year } => {
            let year = year.unwrap_or(current_year);
            let report = AnnualReport::generate(ledger.transactions(), year);
            println!("{}", format_annual_report(&report, options));
        }
    }

    Ok(())
}

/// Handle `years`
pub fn handle_years_command<S: KeyValueStore>(ledger: &Ledger<S>) -> LedgerResult<()> {
    let (current_year, _) = current_period();
    let years = years_with_data(ledger.transactions(), current_year);
    println!("{}", format_years(&years, current_year));
    Ok(())
}
