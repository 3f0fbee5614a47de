//! Transaction model
//!
//! A transaction is an immutable income or expense record. The stored amount
//! is always positive; the direction comes from [`TransactionKind`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Parse a kind from a string, accepting a few common spellings
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" | "credit" | "+" => Some(Self::Income),
            "expense" | "out" | "debit" | "-" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Sign applied to the amount when folding into a balance
    pub fn signed(&self, amount: Money) -> Money {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// User-supplied label, never blank
    pub description: String,

    /// Always strictly positive
    pub amount: Money,

    pub kind: TransactionKind,

    /// When the transaction occurred; also its sort key
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Build a transaction, checking the invariants every stored entry holds.
    pub fn new(
        description: &str,
        amount: Money,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, TransactionValidationError> {
        let txn = Self {
            id: TransactionId::new(),
            description: description.trim().to_string(),
            amount,
            kind,
            timestamp,
        };
        txn.validate()?;
        Ok(txn)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the kind's sign applied (negative for expenses)
    pub fn signed_amount(&self) -> Money {
        self.kind.signed(self.amount)
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if !self.amount.is_within_limit() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.timestamp.format("%Y-%m-%d"),
            self.description,
            self.signed_amount()
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Transaction description cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be greater than zero, got {}", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Transaction amount is too large: {}", amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
