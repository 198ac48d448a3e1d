//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod expense;
pub mod export;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_add, handle_clear, handle_import, handle_list};
pub use export::{handle_export, ExportFormat};
pub use report::{handle_dashboard, handle_forecast, handle_suggest, handle_trends};

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{SpendError, SpendResult};
use crate::models::Expense;
use crate::storage::{ExpenseLedger, KeyValueStore};

/// Parse a YYYY-MM-DD argument
pub fn parse_date(s: &str) -> SpendResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        SpendError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
    })
}

/// The reference instant for reports: the end of `as_of`, or now
pub fn reference_time(as_of: Option<&str>) -> SpendResult<DateTime<Utc>> {
    match as_of {
        None => Ok(Utc::now()),
        Some(s) => {
            let date = parse_date(s)?;
            date.and_hms_opt(23, 59, 59)
                .map(|dt| dt.and_utc())
                .ok_or_else(|| SpendError::Validation(format!("Invalid date '{}'", s)))
        }
    }
}

/// Reference time plus the expenses visible at that time
pub(crate) fn snapshot<S: KeyValueStore>(
    ledger: &ExpenseLedger<S>,
    as_of: Option<&str>,
) -> SpendResult<(DateTime<Utc>, Vec<Expense>)> {
    let now = reference_time(as_of)?;
    let expenses = if as_of.is_some() {
        ledger.expenses_until(now)?
    } else {
        ledger.expenses()?
    };
    Ok((now, expenses))
}
