//! Aggregation over the transaction list
//!
//! Everything here is a pure function of `&[Transaction]`, recomputed on
//! every call. There is no cache to invalidate.

pub mod balance;
pub mod breakdown;
pub mod history;

pub use balance::{
    annual_balance, annual_balance_in, monthly_balance, monthly_balance_in, AnnualReport,
};
pub use breakdown::{description_breakdown, DescriptionBreakdown, DescriptionTotals};
pub use history::{
    history, history_in, recent, sort_newest_first, years_with_data, years_with_data_in,
    HistoryFilter, HistoryTotals,
};
