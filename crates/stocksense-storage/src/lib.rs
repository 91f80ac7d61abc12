//! # stocksense-storage
//!
//! SQLite persistence for items, locations, observations, and aggregates.
//! One write connection serializes all writes; a small pool of read-only
//! connections serves queries concurrently under WAL. Schema changes run
//! through versioned migrations keyed off `PRAGMA user_version`.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;
pub mod recovery;

pub use engine::StorageEngine;

use stocksense_core::errors::{StockError, StorageError};

/// Wrap a low-level SQLite failure message into the workspace error type.
pub(crate) fn to_storage_err(message: String) -> StockError {
    StockError::StorageError(StorageError::SqliteError { message })
}
