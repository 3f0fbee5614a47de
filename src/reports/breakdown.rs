//! Per-description breakdown of a month
//!
//! Groups a month's transactions by their exact description, the closest
//! thing this ledger has to a category.

use std::collections::BTreeMap;

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::models::{Money, Transaction, TransactionKind};

use super::balance::occurs_in;

/// Totals for one description within a month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionTotals {
    pub description: String,
    pub income: Money,
    pub expenses: Money,
    /// Number of transactions
    pub transaction_count: usize,
    /// Share of the month's combined income + expense volume, 0..=100
    pub percentage: f64,
}

impl DescriptionTotals {
    /// Combined volume (income + expenses), the ordering key
    pub fn volume(&self) -> Money {
        self.income + self.expenses
    }
}

/// A month's activity grouped by description
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionBreakdown {
    /// Zero-based month
    pub month: u32,
    pub year: i32,
    /// Largest volume first; ties by description
    pub rows: Vec<DescriptionTotals>,
    /// Combined volume of the whole month
    pub total_volume: Money,
}

impl DescriptionBreakdown {
    /// Generate the breakdown for zero-based `month` of `year` in local time
    pub fn generate(transactions: &[Transaction], month: u32, year: i32) -> Self {
        Self::generate_in(&Local, transactions, month, year)
    }

    /// Generate the breakdown with month membership judged in `tz`
    pub fn generate_in<Tz: TimeZone>(
        tz: &Tz,
        transactions: &[Transaction],
        month: u32,
        year: i32,
    ) -> Self {
        let mut grouped: BTreeMap<&str, (Money, Money, usize)> = BTreeMap::new();

        for txn in transactions.iter().filter(|t| occurs_in(tz, t, month, year)) {
            let entry = grouped
                .entry(txn.description.as_str())
                .or_insert((Money::zero(), Money::zero(), 0));
            match txn.kind {
                TransactionKind::Income => entry.0 += txn.amount,
                TransactionKind::Expense => entry.1 += txn.amount,
            }
            entry.2 += 1;
        }

        let total_volume: Money = grouped.values().map(|(inc, exp, _)| *inc + *exp).sum();

        let mut rows: Vec<DescriptionTotals> = grouped
            .into_iter()
            .map(|(description, (income, expenses, count))| {
                let volume = income + expenses;
                let percentage = if total_volume.is_zero() {
                    0.0
                } else {
                    (volume.cents() as f64 / total_volume.cents() as f64) * 100.0
                };

                DescriptionTotals {
                    description: description.to_string(),
                    income,
                    expenses,
                    transaction_count: count,
                    percentage,
                }
            })
            .collect();

        // BTreeMap already yields descriptions in order, so a stable sort on
        // volume keeps ties alphabetical
        rows.sort_by(|a, b| b.volume().cmp(&a.volume()));

        Self {
            month,
            year,
            rows,
            total_volume,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-description totals for zero-based `month` of `year` in local time
pub fn description_breakdown(
    transactions: &[Transaction],
    month: u32,
    year: i32,
) -> DescriptionBreakdown {
    DescriptionBreakdown::generate(transactions, month, year)
}
