//! Ledger persistence adapter
//!
//! Maps [`LedgerState`] onto two keys of a [`KeyValueStore`]:
//!
//! - `initial_balance`: the baseline as decimal text, e.g. `"1250.50"`
//! - `transactions`: a JSON array of transaction records, timestamps in
//!   RFC 3339
//!
//! Absent keys mean a fresh ledger. Anything present but unreadable is an
//! error: a corrupt store must stop startup rather than be overwritten by
//! the next save.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{LedgerState, Money, Transaction};

use super::kv::KeyValueStore;

/// Store key holding the initial balance
pub const INITIAL_BALANCE_KEY: &str = "initial_balance";

/// Store key holding the transaction list
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Serializes and restores ledger state through a key-value store
#[derive(Debug)]
pub struct LedgerPersistence<S> {
    store: S,
}

impl<S: KeyValueStore> LedgerPersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the underlying store back
    pub fn into_store(self) -> S {
        self.store
    }

    /// Read the persisted state, or an empty ledger if nothing was saved yet
    pub fn load(&self) -> LedgerResult<LedgerState> {
        let initial_balance = match self.store.get(INITIAL_BALANCE_KEY)? {
            Some(text) => Money::parse(&text).map_err(|e| {
                warn!(key = INITIAL_BALANCE_KEY, "stored value is malformed");
                LedgerError::Persistence(format!("Stored initial balance is malformed: {}", e))
            })?,
            None => Money::zero(),
        };

        let transactions = match self.store.get(TRANSACTIONS_KEY)? {
            Some(json) => decode_transactions(&json)?,
            None => Vec::new(),
        };

        debug!(
            initial_balance = %initial_balance,
            count = transactions.len(),
            "loaded ledger state"
        );

        let state = LedgerState {
            initial_balance,
            transactions,
        };

        if state.checked_volume().is_none() {
            warn!("stored ledger totals exceed the supported range");
            return Err(LedgerError::Persistence(
                "Stored ledger totals exceed the supported range".to_string(),
            ));
        }

        Ok(state)
    }

    /// Write the full state, overwriting whatever was stored before
    pub fn save(&mut self, state: &LedgerState) -> LedgerResult<()> {
        self.save_initial_balance(state.initial_balance)?;
        self.save_transactions(&state.transactions)?;

        debug!(count = state.transactions.len(), "saved ledger state");
        Ok(())
    }

    /// Write only the keys whose values differ between `before` and `after`.
    ///
    /// Every ledger mutation changes exactly one key, so each one lands as a
    /// single atomic write: a failure leaves the store exactly at `before`.
    pub fn save_changes(&mut self, before: &LedgerState, after: &LedgerState) -> LedgerResult<()> {
        if before.initial_balance != after.initial_balance {
            self.save_initial_balance(after.initial_balance)?;
        }
        if before.transactions != after.transactions {
            self.save_transactions(&after.transactions)?;
        }
        Ok(())
    }

    /// Write the `initial_balance` key
    pub fn save_initial_balance(&mut self, value: Money) -> LedgerResult<()> {
        self.store
            .set(INITIAL_BALANCE_KEY, &value.to_decimal_string())?;
        debug!(initial_balance = %value, "saved initial balance");
        Ok(())
    }

    /// Write the `transactions` key
    pub fn save_transactions(&mut self, transactions: &[Transaction]) -> LedgerResult<()> {
        let json = serde_json::to_string(transactions).map_err(|e| {
            LedgerError::Persistence(format!("Failed to serialize transactions: {}", e))
        })?;

        self.store.set(TRANSACTIONS_KEY, &json)?;
        debug!(count = transactions.len(), "saved transactions");
        Ok(())
    }
}

/// Parse the stored transaction list and re-check every record's invariants
fn decode_transactions(json: &str) -> LedgerResult<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_str(json).map_err(|e| {
        warn!(key = TRANSACTIONS_KEY, "stored value is malformed");
        LedgerError::Persistence(format!("Stored transactions are malformed: {}", e))
    })?;

    let mut seen = HashSet::with_capacity(transactions.len());
    for txn in &transactions {
        txn.validate().map_err(|e| {
            LedgerError::Persistence(format!("Stored transaction {} is invalid: {}", txn.id, e))
        })?;

        if !seen.insert(txn.id) {
            return Err(LedgerError::Persistence(format!(
                "Stored transactions contain duplicate id {}",
                txn.id
            )));
        }
    }

    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use crate::storage::{FileStore, MemoryStore};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_state() -> LedgerState {
        let mut state = LedgerState::with_initial_balance(Money::from_cents(-1234));
        state.transactions.push(
            Transaction::new(
                "Salary",
                Money::from_cents(100000),
                TransactionKind::Income,
                Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            )
            .unwrap(),
        );
        state.transactions.push(
            Transaction::new(
                "Rent",
                Money::from_cents(40000),
                TransactionKind::Expense,
                Utc.with_ymd_and_hms(2024, 3, 5, 18, 0, 0).unwrap(),
            )
            .unwrap(),
        );
        state
    }

    #[test]
    fn test_load_empty_store() {
        let persistence = LedgerPersistence::new(MemoryStore::new());
        let state = persistence.load().unwrap();
        assert_eq!(state, LedgerState::default());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut persistence = LedgerPersistence::new(MemoryStore::new());
        let state = sample_state();

        persistence.save(&state).unwrap();
        let loaded = persistence.load().unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_round_trip_through_files() {
        let temp_dir = TempDir::new().unwrap();
        let state = sample_state();

        let mut persistence = LedgerPersistence::new(FileStore::new(temp_dir.path()));
        persistence.save(&state).unwrap();

        let reopened = LedgerPersistence::new(FileStore::new(temp_dir.path()));
        assert_eq!(reopened.load().unwrap(), state);
    }

    #[test]
    fn test_stored_layout() {
        let mut persistence = LedgerPersistence::new(MemoryStore::new());
        persistence.save(&sample_state()).unwrap();

        let store = persistence.store();
        assert_eq!(
            store.get(INITIAL_BALANCE_KEY).unwrap().as_deref(),
            Some("-12.34")
        );

        let json = store.get(TRANSACTIONS_KEY).unwrap().unwrap();
        let records: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(records[0]["description"], "Salary");
        assert_eq!(records[0]["kind"], "income");
        assert_eq!(records[1]["timestamp"], "2024-03-05T18:00:00Z");
    }

    #[test]
    fn test_accepts_millisecond_timestamps() {
        let mut store = MemoryStore::new();
        store
            .set(
                TRANSACTIONS_KEY,
                r#"[{"id":"550e8400-e29b-41d4-a716-446655440000","description":"Coffee",
                    "amount":450,"kind":"expense","timestamp":"2024-03-01T12:00:00.000Z"}]"#,
            )
            .unwrap();

        let state = LedgerPersistence::new(store).load().unwrap();
        assert_eq!(state.transactions.len(), 1);
        assert_eq!(
            state.transactions[0].timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_malformed_balance_is_error() {
        let mut store = MemoryStore::new();
        store.set(INITIAL_BALANCE_KEY, "lots").unwrap();

        let err = LedgerPersistence::new(store).load().unwrap_err();
        assert!(err.is_persistence());
    }

    #[test]
    fn test_malformed_transactions_is_error() {
        let mut store = MemoryStore::new();
        store.set(TRANSACTIONS_KEY, "{not a list").unwrap();

        let err = LedgerPersistence::new(store).load().unwrap_err();
        assert!(err.is_persistence());
    }

    #[test]
    fn test_invalid_stored_record_is_error() {
        let mut store = MemoryStore::new();
        store
            .set(
                TRANSACTIONS_KEY,
                r#"[{"id":"550e8400-e29b-41d4-a716-446655440000","description":"Refund",
                    "amount":-100,"kind":"income","timestamp":"2024-03-01T12:00:00Z"}]"#,
            )
            .unwrap();

        let err = LedgerPersistence::new(store).load().unwrap_err();
        assert!(err.is_persistence());
    }

    #[test]
    fn test_duplicate_ids_are_error() {
        let record = r#"{"id":"550e8400-e29b-41d4-a716-446655440000","description":"Tea",
            "amount":100,"kind":"expense","timestamp":"2024-03-01T12:00:00Z"}"#;
        let mut store = MemoryStore::new();
        store
            .set(TRANSACTIONS_KEY, &format!("[{},{}]", record, record))
            .unwrap();

        let err = LedgerPersistence::new(store).load().unwrap_err();
        assert!(err.to_string().contains("duplicate id"));
    }

    #[test]
    fn test_out_of_range_amounts_are_error() {
        let record = r#"{"id":"550e8400-e29b-41d4-a716-446655440000","description":"Jackpot",
            "amount":9223372036854775800,"kind":"income","timestamp":"2024-03-01T12:00:00Z"}"#;
        let mut store = MemoryStore::new();
        store.set(TRANSACTIONS_KEY, &format!("[{}]", record)).unwrap();

        let err = LedgerPersistence::new(store).load().unwrap_err();
        assert!(err.is_persistence());

        let mut store = MemoryStore::new();
        store
            .set(INITIAL_BALANCE_KEY, "92233720368547758.00")
            .unwrap();
        assert!(LedgerPersistence::new(store).load().unwrap_err().is_persistence());
    }

    #[test]
    fn test_save_changes_writes_only_changed_keys() {
        let before = sample_state();
        let mut persistence = LedgerPersistence::new(MemoryStore::new());
        persistence.save_transactions(&before.transactions).unwrap();

        let mut after = before.clone();
        after.initial_balance = Money::from_cents(500);
        persistence.save_changes(&before, &after).unwrap();

        let store = persistence.into_store();
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get(INITIAL_BALANCE_KEY).unwrap().as_deref(),
            Some("5.00")
        );

        let mut persistence = LedgerPersistence::new(MemoryStore::new());
        persistence.save_changes(&before, &before).unwrap();
        assert!(persistence.into_store().is_empty());
    }
}
