//! Report formatting for terminal output

use crate::reports::{
    BudgetLevel, BudgetStatus, Forecast, MonthlyHistory, SpendingMetrics, Trend,
};
use crate::services::Suggestion;

use super::{format_bar, format_percentage, separator};

const WIDTH: usize = 60;
const BAR_WIDTH: usize = 24;

fn currency(symbol: &str, value: f64) -> String {
    format!("{}{:.2}", symbol, value)
}

/// Metrics, budget usage, category breakdown, and forecast on one screen
pub fn format_dashboard(
    metrics: &SpendingMetrics,
    budget: &BudgetStatus,
    forecast: Option<&Forecast>,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str("Spending Dashboard\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:>14}\n",
        "Total Spent:",
        metrics.total.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<20} {:>14}\n",
        "This Month:",
        metrics.this_month.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<20} {:>14}\n",
        "Last 7 Days:",
        metrics.last_week.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<20} {:>14}\n",
        "Budget Left:",
        budget.remaining.format_with_symbol(symbol)
    ));
    output.push('\n');
    output.push_str(&format_budget_status(budget, symbol));

    output.push_str("\nBy Category\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    let breakdown = metrics.category_breakdown();
    if breakdown.is_empty() {
        output.push_str("No expenses recorded.\n");
    }
    for share in breakdown {
        output.push_str(&format!(
            "{:<15} {} {:>12} {:>7}\n",
            share.category.name(),
            format_bar(share.percentage / 100.0, BAR_WIDTH),
            share.amount.format_with_symbol(symbol),
            format_percentage(share.percentage)
        ));
    }

    output.push('\n');
    output.push_str(&format_forecast(forecast, symbol));
    output
}

/// Budget progress line with a warning marker
pub fn format_budget_status(status: &BudgetStatus, symbol: &str) -> String {
    let marker = match status.level {
        BudgetLevel::Healthy => "ok",
        BudgetLevel::Warning => "warning",
        BudgetLevel::Critical => "critical",
    };

    let mut output = format!(
        "Monthly Budget  {} {} [{}]\n",
        format_bar(status.bar_fill() / 100.0, BAR_WIDTH),
        format_percentage(status.percentage),
        marker
    );
    output.push_str(&format!(
        "{} spent of {} limit\n",
        status.spent.format_with_symbol(symbol),
        status.limit.format_with_symbol(symbol)
    ));
    if status.is_over_budget() {
        output.push_str(&format!(
            "Over budget by {}\n",
            (status.spent - status.limit).format_with_symbol(symbol)
        ));
    }
    output
}

/// Forecast summary, or a hint when there is nothing to forecast from
pub fn format_forecast(forecast: Option<&Forecast>, symbol: &str) -> String {
    let Some(forecast) = forecast else {
        return "Forecast: add some expenses to see a prediction.\n".to_string();
    };

    let arrow = match forecast.trend {
        Trend::Increasing => "↑",
        Trend::Decreasing => "↓",
        Trend::Stable => "→",
    };

    let mut output = String::new();
    output.push_str("Forecast\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:>14}\n",
        "Daily Average:",
        currency(symbol, forecast.daily_average)
    ));
    output.push_str(&format!(
        "{:<20} {:>14}\n",
        "Next 30 Days:",
        currency(symbol, forecast.monthly_prediction)
    ));
    output.push_str(&format!(
        "{:<20} {:>14}\n",
        "Trend:",
        format!("{} {}", arrow, forecast.trend)
    ));
    output.push_str(&format!(
        "{:<20} {:>14}\n",
        "Confidence:",
        format!("{}%", forecast.confidence)
    ));
    output
}

/// Month-by-month totals with a bar per month
pub fn format_monthly_history(history: &MonthlyHistory, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str("Monthly Spending\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');

    if history.months.is_empty() {
        output.push_str("No expenses recorded.\n");
        return output;
    }

    for month in &history.months {
        output.push_str(&format!(
            "{} {} {:>12} ({} expenses)\n",
            month.month,
            format_bar(history.relative_height(month), BAR_WIDTH),
            month.total.format_with_symbol(symbol),
            month.count
        ));
    }

    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Highest Month: {}\nAverage Month: {}\nTotal Expenses: {}\n",
        history.highest.format_with_symbol(symbol),
        history.average.format_with_symbol(symbol),
        history.expense_count
    ));
    output
}

/// Saving tips, one block per category
pub fn format_suggestions(suggestions: &[Suggestion], symbol: &str) -> String {
    if suggestions.is_empty() {
        return "No spending to analyze yet.\n".to_string();
    }

    let mut output = String::new();
    for suggestion in suggestions {
        output.push_str(&format!(
            "{} ({}, {})\n  {}\n\n",
            suggestion.category,
            suggestion.amount.format_with_symbol(symbol),
            format_percentage(suggestion.percentage),
            suggestion.tip
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseCategory, Money};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_forecast_without_data() {
        assert!(format_forecast(None, "$").contains("add some expenses"));
    }

    #[test]
    fn test_forecast_lines() {
        let forecast = Forecast {
            daily_average: 19.5,
            monthly_prediction: 585.0,
            trend: Trend::Increasing,
            confidence: 65,
        };
        let output = format_forecast(Some(&forecast), "$");
        assert!(output.contains("$19.50"));
        assert!(output.contains("$585.00"));
        assert!(output.contains("↑ increasing"));
        assert!(output.contains("65%"));
    }

    #[test]
    fn test_dashboard() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let expenses = vec![
            Expense::new(Money::from_dollars(30), ExpenseCategory::Food, "", now),
            Expense::new(
                Money::from_dollars(10),
                ExpenseCategory::Utilities,
                "",
                now - Duration::days(1),
            ),
        ];
        let metrics = SpendingMetrics::compute(&expenses, now);
        let budget = BudgetStatus::compute(Money::from_dollars(100), metrics.this_month);
        let forecast = Forecast::compute(&expenses);

        let output = format_dashboard(&metrics, &budget, forecast.as_ref(), "$");
        assert!(output.contains("Total Spent:"));
        assert!(output.contains("$40.00"));
        assert!(output.contains("Budget Left:"));
        assert!(output.contains("$60.00"));
        assert!(output.contains("75.0%"));
        assert!(output.contains("Confidence:"));
    }

    #[test]
    fn test_over_budget_line() {
        let status = BudgetStatus::compute(Money::from_dollars(50), Money::from_dollars(80));
        let output = format_budget_status(&status, "$");
        assert!(output.contains("[critical]"));
        assert!(output.contains("Over budget by $30.00"));
    }

    #[test]
    fn test_monthly_history() {
        let expenses = vec![Expense::new(
            Money::from_dollars(12),
            ExpenseCategory::Other,
            "",
            Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap(),
        )];
        let output = format_monthly_history(&MonthlyHistory::compute(&expenses), "$");
        assert!(output.contains("2025-03"));
        assert!(output.contains("Highest Month: $12.00"));
        assert!(output.contains("Total Expenses: 1"));
    }
}
