//! pocket-ledger - personal income and expense ledger
//!
//! This library provides the ledger and aggregation engine behind the
//! `pocket` command-line tool. A user records income and expense entries
//! against an initial balance and asks for balances per month and year.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Money, transactions, ledger state, monthly balances
//! - `services`: The [`Ledger`](services::Ledger), sole owner of the state
//! - `reports`: Pure aggregation over the transaction list
//! - `storage`: Durable key-value store and the persistence adapter
//! - `config`: Configuration and path management
//! - `notify`: Notifications about completed mutations
//! - `display`, `export`, `cli`: The command-line front end
//! - `logging`: Tracing subscriber setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use pocket_ledger::models::{Money, TransactionKind};
//! use pocket_ledger::services::Ledger;
//! use pocket_ledger::storage::MemoryStore;
//!
//! let mut ledger = Ledger::open(MemoryStore::new())?;
//! ledger.add_transaction("Salary", Money::parse("1000")?, TransactionKind::Income)?;
//! ledger.add_transaction("Rent", Money::parse("400")?, TransactionKind::Expense)?;
//! assert_eq!(ledger.current_balance(), Money::parse("600")?);
//! # Ok::<(), pocket_ledger::LedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod notify;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
