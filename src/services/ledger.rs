//! Ledger service
//!
//! Owns the [`LedgerState`] for the running application and mirrors every
//! mutation into the durable store before it becomes visible. A mutation
//! changes one store key and is written with a single atomic write; if that
//! write fails the in-memory state stays as it was and the caller gets a
//! persistence error, so memory and store never disagree.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    LedgerState, Money, MonthlyBalance, Transaction, TransactionId, TransactionKind,
};
use crate::notify::{NoopNotifier, Notification, Notifier};
use crate::reports;
use crate::storage::{KeyValueStore, LedgerPersistence};

/// The single owner of ledger state
pub struct Ledger<S: KeyValueStore> {
    state: LedgerState,
    persistence: LedgerPersistence<S>,
    notifier: Box<dyn Notifier>,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Load the persisted state from `store` and take ownership of both.
    ///
    /// A store with malformed data is an error here, before anything can
    /// overwrite it.
    pub fn open(store: S) -> LedgerResult<Self> {
        let persistence = LedgerPersistence::new(store);
        let state = persistence.load()?;

        info!(
            transactions = state.transactions.len(),
            "ledger opened"
        );

        Ok(Self {
            state,
            persistence,
            notifier: Box::new(NoopNotifier),
        })
    }

    /// Route add/remove/clear notifications to `notifier`
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Persist `next` and, only if that worked, make it the current state.
    ///
    /// A state whose totals could overflow is rejected before anything is
    /// written.
    fn commit(&mut self, next: LedgerState) -> LedgerResult<()> {
        if next.checked_volume().is_none() {
            debug!("rejected mutation, ledger totals out of range");
            return Err(LedgerError::invalid(
                "Ledger totals would exceed the supported range",
            ));
        }

        if let Err(err) = self.persistence.save_changes(&self.state, &next) {
            warn!(error = %err, "failed to persist ledger, keeping previous state");
            self.notifier
                .notify(&Notification::error(format!("Could not save changes: {}", err)));
            return Err(err);
        }

        self.state = next;
        Ok(())
    }

    /// Replace the baseline balance; any sign is allowed
    pub fn set_initial_balance(&mut self, value: Money) -> LedgerResult<()> {
        if !value.is_within_limit() {
            return Err(LedgerError::invalid(format!(
                "Initial balance {} is out of range",
                value
            )));
        }

        let next = LedgerState {
            initial_balance: value,
            transactions: self.state.transactions.clone(),
        };
        self.commit(next)?;

        info!(initial_balance = %value, "initial balance set");
        Ok(())
    }

    /// Record a new transaction stamped with the current time
    pub fn add_transaction(
        &mut self,
        description: &str,
        amount: Money,
        kind: TransactionKind,
    ) -> LedgerResult<Transaction> {
        self.add_transaction_at(description, amount, kind, Utc::now())
    }

    /// Record a new transaction with an explicit timestamp
    pub fn add_transaction_at(
        &mut self,
        description: &str,
        amount: Money,
        kind: TransactionKind,
        timestamp: DateTime<Utc>,
    ) -> LedgerResult<Transaction> {
        let txn = Transaction::new(description, amount, kind, timestamp).map_err(|e| {
            debug!(error = %e, "rejected transaction");
            LedgerError::from(e)
        })?;

        let mut next = self.state.clone();
        next.transactions.push(txn.clone());
        self.commit(next)?;

        info!(id = %txn.id.short(), kind = %kind, amount = %amount, "transaction added");

        let message = match kind {
            TransactionKind::Income => "Income added",
            TransactionKind::Expense => "Expense added",
        };
        self.notifier.notify(&Notification::success(message));

        Ok(txn)
    }

    /// Remove the transaction with `id`.
    ///
    /// Returns whether anything was removed. An unknown id is a no-op, not
    /// an error: the state is unchanged, so nothing is rewritten and no
    /// "Transaction removed" notification is sent.
    pub fn remove_transaction(&mut self, id: TransactionId) -> LedgerResult<bool> {
        let Some(position) = self.state.transactions.iter().position(|t| t.id == id) else {
            debug!(id = %id.short(), "remove requested for unknown transaction");
            return Ok(false);
        };

        let mut next = self.state.clone();
        next.transactions.remove(position);
        self.commit(next)?;

        info!(id = %id.short(), "transaction removed");
        self.notifier
            .notify(&Notification::success("Transaction removed"));
        Ok(true)
    }

    /// Remove every transaction, keeping the initial balance.
    ///
    /// Returns how many transactions were removed.
    pub fn clear_all(&mut self) -> LedgerResult<usize> {
        let removed = self.state.transactions.len();
        let next = LedgerState::with_initial_balance(self.state.initial_balance);
        self.commit(next)?;

        info!(removed, "all transactions cleared");
        self.notifier
            .notify(&Notification::success("All transactions removed"));
        Ok(removed)
    }

    /// Initial balance plus income minus expenses
    pub fn current_balance(&self) -> Money {
        self.state.current_balance()
    }

    pub fn initial_balance(&self) -> Money {
        self.state.initial_balance
    }

    /// Read-only view in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Look up a transaction by id
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.state.transactions.iter().find(|t| t.id == id)
    }

    /// Resolve a user-typed reference (full UUID or `txn-` prefix) to an id.
    ///
    /// An unknown reference is `Ok(None)`; one matching several
    /// transactions is rejected as ambiguous.
    pub fn resolve(&self, reference: &str) -> LedgerResult<Option<TransactionId>> {
        let mut matches = self
            .state
            .transactions
            .iter()
            .filter(|t| t.id.matches_reference(reference));

        match (matches.next(), matches.next()) {
            (None, _) => Ok(None),
            (Some(txn), None) => Ok(Some(txn.id)),
            (Some(_), Some(_)) => Err(LedgerError::invalid(format!(
                "'{}' matches more than one transaction, use a longer id",
                reference.trim()
            ))),
        }
    }

    /// Totals for zero-based `month` of `year` (local time)
    pub fn monthly_balance(&self, month: u32, year: i32) -> MonthlyBalance {
        reports::monthly_balance(&self.state.transactions, month, year)
    }

    /// Twelve monthly totals for `year`, January first (local time)
    pub fn annual_balance(&self, year: i32) -> Vec<MonthlyBalance> {
        reports::annual_balance(&self.state.transactions, year)
    }

    /// Give the underlying store back, e.g. to reopen it
    pub fn into_store(self) -> S {
        self.persistence.into_store()
    }
}
