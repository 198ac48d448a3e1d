//! CSV Export functionality
//!
//! Writes expenses as spreadsheet-friendly rows.

use serde::Serialize;
use std::io::Write;

use crate::error::SpendResult;
use crate::models::Expense;

#[derive(Serialize)]
struct ExpenseRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
}

/// Export expenses to CSV, one row per expense
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> SpendResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for expense in expenses {
        csv_writer.serialize(ExpenseRow {
            id: expense.id.as_uuid().to_string(),
            date: expense.date.to_rfc3339(),
            category: expense.category.name(),
            description: &expense.description,
            amount: expense.amount.to_decimal_string(),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_export_rows_and_escaping() {
        let expense = Expense::new(
            Money::from_cents(450),
            ExpenseCategory::Food,
            "Bagel, toasted",
            Utc.with_ymd_and_hms(2025, 2, 3, 8, 15, 0).unwrap(),
        );

        let mut buffer = Vec::new();
        export_expenses_csv(&[expense], &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("ID,Date,Category,Description,Amount"));
        let row = lines.next().unwrap();
        assert!(row.contains("2025-02-03T08:15:00+00:00"));
        assert!(row.contains("\"Bagel, toasted\""));
        assert!(row.ends_with(",4.50"));
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let mut buffer = Vec::new();
        export_expenses_csv(&[], &mut buffer).unwrap();
        assert!(buffer.is_empty());
    }
}
