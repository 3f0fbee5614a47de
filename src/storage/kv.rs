//! Durable key-value stores
//!
//! The ledger only needs string values under a handful of fixed keys. The
//! file-backed store keeps one file per key so that each write replaces a
//! single value atomically; the memory store stands in for it in tests.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};

use super::file_io::{read_text, write_atomic};

/// A string-to-string store that survives process restarts
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if it was never written
    fn get(&self, key: &str) -> LedgerResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> LedgerResult<()>;

    /// Delete `key`; deleting an absent key is not an error
    fn remove(&mut self, key: &str) -> LedgerResult<()>;
}

/// Check that a key is usable as a file name on every platform
fn validate_key(key: &str) -> LedgerResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(LedgerError::Persistence(format!("Invalid store key: '{}'", key)))
    }
}

/// Key-value store backed by a directory, one file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        validate_key(key)?;
        read_text(self.key_path(key))
    }

    fn set(&mut self, key: &str, value: &str) -> LedgerResult<()> {
        validate_key(key)?;
        write_atomic(self.key_path(key), value.as_bytes())
    }

    fn remove(&mut self, key: &str) -> LedgerResult<()> {
        validate_key(key)?;
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LedgerError::Persistence(format!(
                "Failed to remove '{}': {}",
                key, e
            ))),
        }
    }
}

/// In-memory store with the same contract, for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        validate_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> LedgerResult<()> {
        validate_key(key)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> LedgerResult<()> {
        validate_key(key)?;
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &mut dyn KeyValueStore) {
        assert_eq!(store.get("initial_balance").unwrap(), None);

        store.set("initial_balance", "10.00").unwrap();
        assert_eq!(store.get("initial_balance").unwrap().as_deref(), Some("10.00"));

        store.set("initial_balance", "-2.50").unwrap();
        assert_eq!(store.get("initial_balance").unwrap().as_deref(), Some("-2.50"));

        store.remove("initial_balance").unwrap();
        assert_eq!(store.get("initial_balance").unwrap(), None);

        // removing twice is fine
        store.remove("initial_balance").unwrap();
    }

    #[test]
    fn test_memory_store_contract() {
        let mut store = MemoryStore::new();
        exercise(&mut store);
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_contract() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("data"));
        exercise(&mut store);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("data");

        let mut store = FileStore::new(&dir);
        store.set("transactions", "[]").unwrap();
        assert!(store.key_path("transactions").exists());

        let reopened = FileStore::new(&dir);
        assert_eq!(reopened.get("transactions").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_rejects_bad_keys() {
        let mut store = MemoryStore::new();
        for key in ["", "../escape", "with space", "a/b"] {
            let err = store.set(key, "x").unwrap_err();
            assert!(err.is_persistence(), "key '{}' should be rejected", key);
        }
    }
}
