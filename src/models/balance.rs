//! Monthly balance value object

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Month names, indexed 0 = January .. 11 = December
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Income, expenses and net balance of one calendar month.
///
/// Always derived from the transaction list on request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    /// Zero-based month, 0 = January
    pub month: u32,
    pub year: i32,
    pub income: Money,
    pub expenses: Money,
    /// Always `income - expenses`
    pub balance: Money,
}

impl MonthlyBalance {
    /// Build from the two totals; the balance is computed here so it can
    /// never disagree with them.
    pub fn new(month: u32, year: i32, income: Money, expenses: Money) -> Self {
        Self {
            month,
            year,
            income,
            expenses,
            balance: income - expenses,
        }
    }

    /// A month with no activity
    pub fn empty(month: u32, year: i32) -> Self {
        Self::new(month, year, Money::zero(), Money::zero())
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_zero() && self.expenses.is_zero()
    }

    /// English month name, or "?" for an out-of-range month
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }
}

/// English name for a zero-based month
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES.get(month as usize).copied().unwrap_or("?")
}
