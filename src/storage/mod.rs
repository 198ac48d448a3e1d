//! Storage layer for SpendCast
//!
//! A key-value persistence collaborator with a JSON file implementation,
//! and the expense ledger built on top of it.

pub mod file_io;
pub mod ledger;
pub mod store;

pub use file_io::{read_optional, write_atomic, write_json_atomic};
pub use ledger::{ExpenseLedger, BUDGET_LIMIT_KEY, DEFAULT_BUDGET_LIMIT, EXPENSES_KEY};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use crate::config::paths::SpendPaths;
use crate::error::SpendError;

/// Open the on-disk ledger under the configured data directory
pub fn open_ledger(paths: &SpendPaths) -> Result<ExpenseLedger<FileStore>, SpendError> {
    paths.ensure_directories()?;
    Ok(ExpenseLedger::new(FileStore::new(paths.data_dir())))
}
