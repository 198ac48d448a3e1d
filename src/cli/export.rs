//! Export CLI command

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use clap::ValueEnum;

use crate::error::SpendResult;
use crate::export::{export_expenses_csv, export_full_json};
use crate::storage::{ExpenseLedger, KeyValueStore};

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Expense rows only
    #[default]
    Csv,
    /// Full ledger including the budget limit
    Json,
}

/// Handle `export`
pub fn handle_export<S: KeyValueStore>(
    ledger: &ExpenseLedger<S>,
    output: &Path,
    format: ExportFormat,
) -> SpendResult<()> {
    let mut writer = BufWriter::new(File::create(output)?);

    match format {
        ExportFormat::Csv => {
            let expenses = ledger.expenses()?;
            export_expenses_csv(&expenses, &mut writer)?;
            println!("Exported {} expenses to {}", expenses.len(), output.display());
        }
        ExportFormat::Json => {
            export_full_json(ledger, &mut writer, true, Utc::now())?;
            println!("Exported ledger to {}", output.display());
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseCategory, Money};
    use crate::storage::MemoryStore;
    use tempfile::TempDir;

    fn ledger_with_one() -> ExpenseLedger<MemoryStore> {
        let ledger = ExpenseLedger::new(MemoryStore::new());
        ledger
            .append(vec![Expense::new(
                Money::from_cents(450),
                ExpenseCategory::Food,
                "Bagel",
                Utc::now(),
            )])
            .unwrap();
        ledger
    }

    #[test]
    fn test_export_csv() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        handle_export(&ledger_with_one(), &path, ExportFormat::Csv).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("ID,Date,Category,Description,Amount"));
        assert!(contents.contains("Bagel"));
    }

    #[test]
    fn test_export_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.json");
        handle_export(&ledger_with_one(), &path, ExportFormat::Json).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["expense_count"], 1);
    }
}
