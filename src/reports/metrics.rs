//! Spending metrics
//!
//! Aggregates an expense snapshot into running totals: everything to date,
//! the current calendar month, the trailing seven days, and per category.
//! The reference instant is always passed in, never read from the clock.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Expense, ExpenseCategory, Money};

/// Length of the trailing window used for `last_week`
pub const LAST_WEEK_DAYS: i64 = 7;

/// Summary totals over an expense snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpendingMetrics {
    /// Sum of every expense
    pub total: Money,
    /// Sum of expenses in the same calendar month and year as `now`
    pub this_month: Money,
    /// Sum of expenses dated within `[now - 7 days, now]`
    pub last_week: Money,
    /// Sum per category, only for categories that appear
    pub category_totals: BTreeMap<ExpenseCategory, Money>,
    /// Number of expenses aggregated
    pub expense_count: usize,
}

/// One category's slice of total spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub amount: Money,
    /// Percentage of total spending (0-100)
    pub percentage: f64,
}

impl SpendingMetrics {
    /// Compute metrics for `expenses` as of `now`
    pub fn compute(expenses: &[Expense], now: DateTime<Utc>) -> Self {
        let week_start = now - Duration::days(LAST_WEEK_DAYS);

        let mut metrics = Self {
            total: Money::zero(),
            this_month: Money::zero(),
            last_week: Money::zero(),
            category_totals: BTreeMap::new(),
            expense_count: expenses.len(),
        };

        for expense in expenses {
            metrics.total += expense.amount;

            if expense.date.year() == now.year() && expense.date.month() == now.month() {
                metrics.this_month += expense.amount;
            }

            if expense.date >= week_start && expense.date <= now {
                metrics.last_week += expense.amount;
            }

            *metrics
                .category_totals
                .entry(expense.category)
                .or_insert_with(Money::zero) += expense.amount;
        }

        metrics
    }

    /// Categories ordered by spend, largest first, with their share of the total
    pub fn category_breakdown(&self) -> Vec<CategoryShare> {
        shares_of(&self.category_totals, self.total)
    }

    /// The `limit` categories with the most spending
    pub fn top_categories(&self, limit: usize) -> Vec<CategoryShare> {
        let mut shares = self.category_breakdown();
        shares.truncate(limit);
        shares
    }

    pub fn is_empty(&self) -> bool {
        self.expense_count == 0
    }
}

/// Sum expenses per calendar day, discarding time of day
pub fn daily_totals(expenses: &[Expense]) -> BTreeMap<NaiveDate, Money> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.day()).or_insert_with(Money::zero) += expense.amount;
    }
    totals
}

/// Category shares of an expense snapshot, largest first
///
/// Categories with equal spend keep [`ExpenseCategory::ALL`] order.
pub fn category_shares(expenses: &[Expense]) -> Vec<CategoryShare> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        *totals.entry(expense.category).or_insert_with(Money::zero) += expense.amount;
    }
    let total: Money = totals.values().sum();
    shares_of(&totals, total)
}

fn shares_of(totals: &BTreeMap<ExpenseCategory, Money>, total: Money) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = totals
        .iter()
        .map(|(&category, &amount)| CategoryShare {
            category,
            amount,
            percentage: percentage_of(amount, total),
        })
        .collect();

    // Stable sort: ties keep category order
    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    shares
}

pub(crate) fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}
