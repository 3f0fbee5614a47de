//! Service layer
//!
//! The ledger service sits on top of the storage layer and keeps the
//! in-memory state and the durable store in step.

pub mod ledger;

pub use ledger::Ledger;
