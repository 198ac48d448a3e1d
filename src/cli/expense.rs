//! Expense CLI commands
//!
//! Adding, listing, clearing, and importing expenses.

use std::io::Read;
use std::path::Path;

use chrono::Utc;

use crate::config::settings::Settings;
use crate::display::format_expense_list;
use crate::error::{SpendError, SpendResult};
use crate::models::{ExpenseCategory, ExpenseDraft, Money};
use crate::services::{parse_extraction_response, ExpenseFilter, ExpenseService};
use crate::storage::{ExpenseLedger, KeyValueStore};

use super::parse_date;

/// Handle `add`
pub fn handle_add<S: KeyValueStore>(
    ledger: &ExpenseLedger<S>,
    settings: &Settings,
    amount: &str,
    category: Option<&str>,
    description: Option<String>,
    date: Option<&str>,
) -> SpendResult<()> {
    let amount = Money::parse(amount).map_err(|e| SpendError::Validation(e.to_string()))?;

    let category = match category {
        None => ExpenseCategory::Other,
        Some(name) => ExpenseCategory::from_name(name).unwrap_or_else(|| {
            eprintln!("Unknown category '{}', filing under Other.", name);
            ExpenseCategory::Other
        }),
    };

    let date = match date {
        Some(s) => parse_date(s)?.and_time(chrono::NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };

    let draft = ExpenseDraft::new(amount, category, description.unwrap_or_default());
    let expense = ExpenseService::new(ledger).add(draft, date)?;

    println!(
        "Added {} {} on {} ({})",
        expense.category,
        expense.amount.format_with_symbol(&settings.currency_symbol),
        expense.date.format(&settings.date_format),
        expense.id
    );
    Ok(())
}

/// Handle `list`
pub fn handle_list<S: KeyValueStore>(
    ledger: &ExpenseLedger<S>,
    settings: &Settings,
    category: Option<&str>,
    limit: usize,
) -> SpendResult<()> {
    let mut filter = ExpenseFilter::new().limit(limit);
    if let Some(name) = category {
        let category = ExpenseCategory::from_name(name).ok_or_else(|| {
            SpendError::Validation(format!("Unknown category '{}'", name))
        })?;
        filter = filter.category(category);
    }

    let expenses = ExpenseService::new(ledger).list(&filter)?;
    print!(
        "{}",
        format_expense_list(&expenses, &settings.currency_symbol, &settings.date_format)
    );
    Ok(())
}

/// Handle `clear`
pub fn handle_clear<S: KeyValueStore>(ledger: &ExpenseLedger<S>, yes: bool) -> SpendResult<()> {
    if !yes {
        return Err(SpendError::Validation(
            "Clearing deletes every expense and cannot be undone. Re-run with --yes".into(),
        ));
    }

    ExpenseService::new(ledger).clear()?;
    println!("All expenses cleared.");
    Ok(())
}

/// Handle `import`: add expenses from a saved receipt extraction response
///
/// `-` reads the response from stdin.
pub fn handle_import<S: KeyValueStore>(
    ledger: &ExpenseLedger<S>,
    settings: &Settings,
    file: &Path,
    dry_run: bool,
) -> SpendResult<()> {
    let response = if file == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(file).map_err(|e| {
            SpendError::Io(format!("Failed to read {}: {}", file.display(), e))
        })?
    };

    let outcome = parse_extraction_response(&response)?;

    for rejection in &outcome.rejected {
        eprintln!("Skipped item {}: {}", rejection.index + 1, rejection.reason);
    }

    let symbol = &settings.currency_symbol;
    if dry_run {
        println!("Would add {} expenses:", outcome.accepted.len());
        for draft in &outcome.accepted {
            println!(
                "  {:14} {:30} {:>12}",
                draft.category.name(),
                draft.description,
                draft.amount.format_with_symbol(symbol)
            );
        }
        return Ok(());
    }

    let batch = ExpenseService::new(ledger).add_batch(outcome.accepted, Utc::now())?;
    let total: Money = batch.added.iter().map(|e| e.amount).sum();
    println!(
        "Added {} expenses totalling {}.",
        batch.added.len(),
        total.format_with_symbol(symbol)
    );
    Ok(())
}
