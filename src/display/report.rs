//! Report formatting for terminal output
//!
//! Balance summary, month and year reports, and the description breakdown.

use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::{truncate, DisplayOptions};
use crate::models::{month_name, Money, MonthlyBalance};
use crate::reports::{AnnualReport, DescriptionBreakdown};

const REPORT_WIDTH: usize = 60;
const BAR_WIDTH: usize = 20;

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Create a simple bar chart representation
fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Current and initial balance, the answer to `pocket balance`
pub fn format_balance_summary(
    initial: Money,
    current: Money,
    transaction_count: usize,
    options: &DisplayOptions,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Current balance: {}\n", options.money(current)));
    output.push_str(&format!("Initial balance: {}\n", options.money(initial)));
    output.push_str(&format!("Transactions:    {}\n", transaction_count));
    output
}

/// Totals for a single month
pub fn format_monthly_balance(month: &MonthlyBalance, options: &DisplayOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} {}\n", month.month_name(), month.year));
    output.push_str(&separator(REPORT_WIDTH / 2));
    output.push('\n');
    output.push_str(&format!("Income:   {:>14}\n", options.money(month.income)));
    output.push_str(&format!("Expenses: {:>14}\n", options.money(month.expenses)));
    output.push_str(&format!("Balance:  {:>14}\n", options.money(month.balance)));

    output
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Twelve-month table with a totals row
pub fn format_annual_report(report: &AnnualReport, options: &DisplayOptions) -> String {
    let mut rows: Vec<MonthRow> = report
        .months
        .iter()
        .map(|m| MonthRow {
            month: month_name(m.month).to_string(),
            income: options.money(m.income),
            expenses: options.money(m.expenses),
            balance: options.money(m.balance),
        })
        .collect();

    rows.push(MonthRow {
        month: "Total".to_string(),
        income: options.money(report.total_income),
        expenses: options.money(report.total_expenses),
        balance: options.money(report.total_balance),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(1..), Alignment::right())
        .modify(Rows::first(), Alignment::center());

    format!("Year {}\n{}", report.year, table)
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Per-description table for a month
pub fn format_breakdown(breakdown: &DescriptionBreakdown, options: &DisplayOptions) -> String {
    if breakdown.is_empty() {
        return format!(
            "No transactions in {} {}.",
            month_name(breakdown.month),
            breakdown.year
        );
    }

    let max_volume = breakdown
        .rows
        .first()
        .map(|r| r.volume().cents() as f64)
        .unwrap_or(0.0);

    let rows = breakdown.rows.iter().map(|r| BreakdownRow {
        description: truncate(&r.description, 28),
        income: options.money(r.income),
        expenses: options.money(r.expenses),
        count: r.transaction_count,
        share: format_percentage(r.percentage),
        bar: format_bar(r.volume().cents() as f64, max_volume, BAR_WIDTH),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::new(1..5), Alignment::right());

    table.to_string()
}

/// Years with data, newest first, marking the current one
pub fn format_years(years: &[i32], current_year: i32) -> String {
    years
        .iter()
        .map(|y| {
            if *y == current_year {
                format!("{} (current)", y)
            } else {
                y.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
