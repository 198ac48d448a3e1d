//! JSON Export functionality
//!
//! Exports the expense ledger and budget limit as one versioned document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{SpendError, SpendResult};
use crate::models::{Expense, Money};
use crate::storage::{ExpenseLedger, KeyValueStore};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    /// Application version that created the export
    pub app_version: String,
    pub budget_limit: Money,
    pub expenses: Vec<Expense>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub earliest_expense: Option<DateTime<Utc>>,
    pub latest_expense: Option<DateTime<Utc>>,
}

impl FullExport {
    /// Snapshot the ledger
    pub fn from_ledger<S: KeyValueStore>(
        ledger: &ExpenseLedger<S>,
        exported_at: DateTime<Utc>,
    ) -> SpendResult<Self> {
        let expenses = ledger.expenses()?;
        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            earliest_expense: expenses.iter().map(|e| e.date).min(),
            latest_expense: expenses.iter().map(|e| e.date).max(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            budget_limit: ledger.budget_limit()?,
            expenses,
            metadata,
        })
    }
}

/// Export the ledger to JSON
pub fn export_full_json<S: KeyValueStore, W: Write>(
    ledger: &ExpenseLedger<S>,
    writer: &mut W,
    pretty: bool,
    exported_at: DateTime<Utc>,
) -> SpendResult<()> {
    let export = FullExport::from_ledger(ledger, exported_at)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| SpendError::Export(e.to_string()))?;

    Ok(())
}
