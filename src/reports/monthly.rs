//! Month-by-month spending history
//!
//! Groups expenses by calendar month and reports the highest and average
//! monthly totals.

use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::models::{Expense, Money};

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Spending within a single month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTotal {
    pub month: YearMonth,
    pub total: Money,
    pub count: usize,
}

/// Spending history grouped by month, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyHistory {
    pub months: Vec<MonthTotal>,
    /// Largest monthly total, zero when there is no data
    pub highest: Money,
    /// Mean of the monthly totals, rounded to the cent
    pub average: Money,
    pub expense_count: usize,
}

impl MonthlyHistory {
    pub fn compute(expenses: &[Expense]) -> Self {
        let mut by_month: BTreeMap<YearMonth, (Money, usize)> = BTreeMap::new();
        for expense in expenses {
            let key = YearMonth {
                year: expense.date.year(),
                month: expense.date.month(),
            };
            let entry = by_month.entry(key).or_insert((Money::zero(), 0));
            entry.0 += expense.amount;
            entry.1 += 1;
        }

        let months: Vec<MonthTotal> = by_month
            .into_iter()
            .map(|(month, (total, count))| MonthTotal {
                month,
                total,
                count,
            })
            .collect();

        let highest = months.iter().map(|m| m.total).max().unwrap_or_default();
        let average = if months.is_empty() {
            Money::zero()
        } else {
            let sum: Money = months.iter().map(|m| m.total).sum();
            Money::from_cents((sum.cents() as f64 / months.len() as f64).round() as i64)
        };

        Self {
            months,
            highest,
            average,
            expense_count: expenses.len(),
        }
    }

    /// A month's total as a fraction of `highest`, for bar charts
    pub fn relative_height(&self, month: &MonthTotal) -> f64 {
        if self.highest.is_zero() {
            0.0
        } else {
            month.total.cents() as f64 / self.highest.cents() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseCategory;
    use chrono::{TimeZone, Utc};

    fn expense(cents: i64, y: i32, m: u32, d: u32) -> Expense {
        Expense::new(
            Money::from_cents(cents),
            ExpenseCategory::Other,
            "",
            Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_empty_history() {
        let history = MonthlyHistory::compute(&[]);
        assert!(history.months.is_empty());
        assert_eq!(history.highest, Money::zero());
        assert_eq!(history.average, Money::zero());
        assert_eq!(history.expense_count, 0);
    }

    #[test]
    fn test_groups_by_month_in_order() {
        let expenses = vec![
            expense(3000, 2025, 2, 10),
            expense(1000, 2025, 1, 5),
            expense(500, 2025, 1, 28),
            expense(9000, 2024, 12, 31),
        ];

        let history = MonthlyHistory::compute(&expenses);
        let labels: Vec<String> = history.months.iter().map(|m| m.month.to_string()).collect();
        assert_eq!(labels, vec!["2024-12", "2025-01", "2025-02"]);

        assert_eq!(history.months[1].total.cents(), 1500);
        assert_eq!(history.months[1].count, 2);
        assert_eq!(history.highest.cents(), 9000);
        assert_eq!(history.average.cents(), 4500);
        assert_eq!(history.expense_count, 4);
    }

    #[test]
    fn test_relative_height() {
        let expenses = vec![expense(2000, 2025, 1, 1), expense(500, 2025, 2, 1)];
        let history = MonthlyHistory::compute(&expenses);
        assert_eq!(history.relative_height(&history.months[0]), 1.0);
        assert_eq!(history.relative_height(&history.months[1]), 0.25);
    }
}
