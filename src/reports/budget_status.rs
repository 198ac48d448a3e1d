//! Monthly budget status
//!
//! Compares this month's spending against the user's monthly limit.

use serde::Serialize;

use super::metrics::percentage_of;
use crate::models::Money;

/// Usage above this percentage is a warning
pub const WARNING_THRESHOLD: f64 = 75.0;

/// Usage above this percentage is critical
pub const CRITICAL_THRESHOLD: f64 = 90.0;

/// How close spending is to the limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    Healthy,
    Warning,
    Critical,
}

/// Spending against a monthly budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub limit: Money,
    pub spent: Money,
    /// Negative when over budget
    pub remaining: Money,
    /// Spent as a percentage of the limit, unclamped
    pub percentage: f64,
    pub level: BudgetLevel,
}

impl BudgetStatus {
    pub fn compute(limit: Money, spent_this_month: Money) -> Self {
        let percentage = percentage_of(spent_this_month, limit);
        let level = if percentage > CRITICAL_THRESHOLD {
            BudgetLevel::Critical
        } else if percentage > WARNING_THRESHOLD {
            BudgetLevel::Warning
        } else {
            BudgetLevel::Healthy
        };

        Self {
            limit,
            spent: spent_this_month,
            remaining: limit - spent_this_month,
            percentage,
            level,
        }
    }

    /// Percentage clamped to 100 for progress bars
    pub fn bar_fill(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}
