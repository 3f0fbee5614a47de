//! Core data models for pocket-ledger
//!
//! Transactions, the ledger state that owns them, and the derived monthly
//! balance value object.

pub mod balance;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod transaction;

pub use balance::{month_name, MonthlyBalance, MONTH_NAMES};
pub use ids::TransactionId;
pub use ledger::LedgerState;
pub use money::{Money, MoneyParseError, MAX_UNITS};
pub use transaction::{Transaction, TransactionKind, TransactionValidationError};
