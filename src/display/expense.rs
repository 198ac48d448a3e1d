//! Expense list formatting

use crate::models::Expense;

use super::truncate;

/// Format expenses as a register table
pub fn format_expense_list(expenses: &[Expense], symbol: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses recorded.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:14} {:30} {:>12}\n",
        "ID", "Date", "Category", "Description", "Amount"
    ));
    output.push_str(&"-".repeat(82));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format!(
            "{:12} {:10} {:14} {:30} {:>12}\n",
            expense.id.to_string(),
            expense.date.format(date_format).to_string(),
            expense.category.name(),
            truncate(&expense.description, 30),
            expense.amount.format_with_symbol(symbol)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Money};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_expense_list(&[], "$", "%Y-%m-%d"),
            "No expenses recorded.\n"
        );
    }

    #[test]
    fn test_rows() {
        let expense = Expense::new(
            Money::from_cents(1250),
            ExpenseCategory::Transportation,
            "Train ticket",
            Utc.with_ymd_and_hms(2025, 7, 4, 8, 0, 0).unwrap(),
        );

        let output = format_expense_list(&[expense], "€", "%d/%m/%Y");
        assert!(output.contains("04/07/2025"));
        assert!(output.contains("Transportation"));
        assert!(output.contains("Train ticket"));
        assert!(output.contains("€12.50"));
    }
}
