//! Ledger state
//!
//! The raw data behind every view: a baseline balance and the transactions
//! recorded against it. Nothing derived is stored here.

use serde::{Deserialize, Serialize};

use super::money::Money;
use super::transaction::Transaction;

/// Baseline balance plus the insertion-ordered transaction list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Signed starting point, settable independently of transactions
    pub initial_balance: Money,

    /// Insertion order carries no meaning; views sort by timestamp
    pub transactions: Vec<Transaction>,
}

impl LedgerState {
    /// Create a state with the given baseline and no transactions
    pub fn with_initial_balance(initial_balance: Money) -> Self {
        Self {
            initial_balance,
            transactions: Vec::new(),
        }
    }

    /// Initial balance plus income minus expenses, over every transaction
    pub fn current_balance(&self) -> Money {
        self.transactions
            .iter()
            .fold(self.initial_balance, |balance, txn| balance + txn.signed_amount())
    }

    /// Magnitude of the initial balance plus every transaction amount, or
    /// `None` if that does not fit in [`Money`].
    ///
    /// Every aggregate (current balance, any month's income, expenses or
    /// balance, any filtered total) is bounded by this value, so a state
    /// whose volume fits cannot overflow when summed.
    pub fn checked_volume(&self) -> Option<Money> {
        self.transactions
            .iter()
            .try_fold(self.initial_balance.checked_abs()?, |total, txn| {
                total.checked_add(txn.amount.checked_abs()?)
            })
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }
}
