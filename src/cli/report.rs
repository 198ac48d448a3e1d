//! Report CLI commands
//!
//! Dashboard, forecast, monthly trends, and saving tips. All reports are
//! recomputed from the full ledger on every invocation.

use serde_json::json;

use crate::config::settings::Settings;
use crate::display::{
    format_dashboard, format_forecast, format_monthly_history, format_suggestions,
};
use crate::error::SpendResult;
use crate::reports::{BudgetStatus, Forecast, MonthlyHistory, SpendingMetrics};
use crate::services::{build_tip_requests, generate_suggestions, CommandTipProvider};
use crate::storage::{ExpenseLedger, KeyValueStore};

use super::snapshot;

fn print_json<T: serde::Serialize>(value: &T) -> SpendResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Handle `dashboard`
pub fn handle_dashboard<S: KeyValueStore>(
    ledger: &ExpenseLedger<S>,
    settings: &Settings,
    as_of: Option<&str>,
    as_json: bool,
) -> SpendResult<()> {
    let (now, expenses) = snapshot(ledger, as_of)?;
    let metrics = SpendingMetrics::compute(&expenses, now);
    let budget = BudgetStatus::compute(ledger.budget_limit()?, metrics.this_month);
    let forecast = Forecast::compute(&expenses);

    if as_json {
        return print_json(&json!({
            "as_of": now,
            "metrics": metrics,
            "categories": metrics.category_breakdown(),
            "budget": budget,
            "forecast": forecast,
        }));
    }

    print!(
        "{}",
        format_dashboard(&metrics, &budget, forecast.as_ref(), &settings.currency_symbol)
    );
    Ok(())
}

/// Handle `forecast`
pub fn handle_forecast<S: KeyValueStore>(
    ledger: &ExpenseLedger<S>,
    settings: &Settings,
    as_of: Option<&str>,
    as_json: bool,
) -> SpendResult<()> {
    let (_, expenses) = snapshot(ledger, as_of)?;
    let forecast = Forecast::compute(&expenses);

    if as_json {
        return print_json(&forecast);
    }

    print!(
        "{}",
        format_forecast(forecast.as_ref(), &settings.currency_symbol)
    );
    Ok(())
}

/// Handle `trends`
pub fn handle_trends<S: KeyValueStore>(
    ledger: &ExpenseLedger<S>,
    settings: &Settings,
    as_json: bool,
) -> SpendResult<()> {
    let history = MonthlyHistory::compute(&ledger.expenses()?);

    if as_json {
        return print_json(&history);
    }

    print!(
        "{}",
        format_monthly_history(&history, &settings.currency_symbol)
    );
    Ok(())
}

/// Handle `suggest`
///
/// With no tip command configured, prints the prompt each category would
/// have been sent.
pub fn handle_suggest<S: KeyValueStore>(
    ledger: &ExpenseLedger<S>,
    settings: &Settings,
    command: Option<&str>,
) -> SpendResult<()> {
    let expenses = ledger.expenses()?;

    let Some(command) = command.or(settings.suggestion_command.as_deref()) else {
        let requests = build_tip_requests(&expenses);
        if requests.is_empty() {
            println!("No spending to analyze yet.");
        }
        for request in requests {
            println!("# {}", request.category);
            println!("{}", request.prompt());
            println!();
        }
        return Ok(());
    };

    let provider = CommandTipProvider::parse(command)?;
    let suggestions = generate_suggestions(&expenses, &provider);
    print!(
        "{}",
        format_suggestions(&suggestions, &settings.currency_symbol)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseCategory, Money};
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn sample_ledger() -> ExpenseLedger<MemoryStore> {
        let ledger = ExpenseLedger::new(MemoryStore::new());
        let day = |d| Utc.with_ymd_and_hms(2025, 4, d, 12, 0, 0).unwrap();
        ledger
            .append(vec![
                Expense::new(Money::from_dollars(10), ExpenseCategory::Food, "Lunch", day(1)),
                Expense::new(Money::from_dollars(20), ExpenseCategory::Utilities, "Water", day(2)),
                Expense::new(Money::from_dollars(5), ExpenseCategory::Food, "", day(20)),
            ])
            .unwrap();
        ledger
    }

    #[test]
    fn test_reports_run_on_empty_ledger() {
        let ledger = ExpenseLedger::new(MemoryStore::new());
        let settings = Settings::default();
        handle_dashboard(&ledger, &settings, None, false).unwrap();
        handle_forecast(&ledger, &settings, None, true).unwrap();
        handle_trends(&ledger, &settings, false).unwrap();
        handle_suggest(&ledger, &settings, None).unwrap();
    }

    #[test]
    fn test_reports_with_as_of() {
        let ledger = sample_ledger();
        let settings = Settings::default();
        handle_dashboard(&ledger, &settings, Some("2025-04-10"), true).unwrap();
        handle_forecast(&ledger, &settings, Some("2025-04-10"), false).unwrap();
        assert!(handle_dashboard(&ledger, &settings, Some("April"), false).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_suggest_with_command() {
        let ledger = sample_ledger();
        handle_suggest(&ledger, &Settings::default(), Some("cat")).unwrap();
    }

    #[test]
    fn test_suggest_rejects_blank_command() {
        let ledger = sample_ledger();
        assert!(handle_suggest(&ledger, &Settings::default(), Some("   ")).is_err());
    }
}
