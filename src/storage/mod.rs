//! Storage layer for pocket-ledger
//!
//! A small durable key-value store (one file per key, atomic writes) and the
//! adapter that maps ledger state onto it.

pub mod file_io;
pub mod kv;
pub mod persistence;

pub use file_io::{read_json, read_text, write_atomic, write_json_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use persistence::{LedgerPersistence, INITIAL_BALANCE_KEY, TRANSACTIONS_KEY};

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Open the file-backed store for the configured data directory
pub fn open_file_store(paths: &LedgerPaths) -> Result<FileStore, LedgerError> {
    paths.ensure_directories()?;
    Ok(FileStore::new(paths.data_dir()))
}
