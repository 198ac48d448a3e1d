//! Short-horizon spending forecast
//!
//! Buckets expenses by day and projects a daily spend from the historical
//! average, nudged by the change between the first and last observed day.
//! A separate first-half/second-half comparison labels the trend. The two
//! notions of "trend" are intentionally not reconciled.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use super::metrics::daily_totals;
use crate::models::{Expense, Money};

/// Number of days in a projected month
pub const PROJECTION_DAYS: f64 = 30.0;

/// Weight of the first-to-last slope in the daily prediction
pub const SLOPE_WEIGHT: f64 = 0.3;

/// Confidence ceiling
pub const MAX_CONFIDENCE: u8 = 85;

const SINGLE_DAY_CONFIDENCE: u8 = 30;
const FLAT_SPAN_CONFIDENCE: u8 = 40;
const DENOMINATOR_EPSILON: f64 = 0.0001;

/// Direction of spending over the observed days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing"),
            Self::Decreasing => write!(f, "decreasing"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

/// Predicted spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    /// Predicted spend per day
    pub daily_average: f64,
    /// `daily_average` projected over 30 days
    pub monthly_prediction: f64,
    pub trend: Trend,
    /// Heuristic reliability score, 0-100
    pub confidence: u8,
}

/// A day's total positioned relative to the first observed day
#[derive(Debug, Clone, Copy)]
struct DayPoint {
    x: f64,
    y: f64,
}

impl Forecast {
    /// Forecast spending from an expense snapshot
    ///
    /// Returns `None` when there are no expenses.
    pub fn compute(expenses: &[Expense]) -> Option<Self> {
        if expenses.is_empty() {
            return None;
        }

        let totals = daily_totals(expenses);
        let n = totals.len();

        if n < 2 {
            // Averaged over records, not days
            let total: Money = expenses.iter().map(|e| e.amount).sum();
            let daily = total.as_f64() / expenses.len() as f64;
            return Some(Self::flat(daily, SINGLE_DAY_CONFIDENCE));
        }

        // BTreeMap iteration is already in day order
        let days: Vec<(NaiveDate, f64)> = totals.iter().map(|(d, m)| (*d, m.as_f64())).collect();
        let first_day = days[0].0;
        let last_day = days[n - 1].0;
        let days_between = ((last_day - first_day).num_days() + 1).max(1);

        let points: Vec<DayPoint> = days
            .iter()
            .map(|(day, total)| DayPoint {
                x: (*day - first_day).num_days() as f64,
                y: *total,
            })
            .collect();

        let nf = n as f64;
        let sum_x: f64 = points.iter().map(|p| p.x).sum();
        let sum_xx: f64 = points.iter().map(|p| p.x * p.x).sum();
        let sum_y: f64 = points.iter().map(|p| p.y).sum();
        let denominator = nf * sum_xx - sum_x * sum_x;

        if denominator.abs() < DENOMINATOR_EPSILON {
            return Some(Self::flat(sum_y / nf, FLAT_SPAN_CONFIDENCE));
        }

        let avg_daily_historical = sum_y / days_between as f64;
        let predicted_daily = if n >= 3 {
            let first = points[0];
            let last = points[n - 1];
            let slope = (last.y - first.y) / (last.x - first.x).max(1.0);
            (avg_daily_historical + slope * SLOPE_WEIGHT).max(0.0)
        } else {
            avg_daily_historical
        };

        let trend = if n >= 3 {
            classify_trend(&points)
        } else {
            Trend::Stable
        };

        Some(Self {
            daily_average: predicted_daily,
            monthly_prediction: predicted_daily * PROJECTION_DAYS,
            trend,
            confidence: confidence(n, days_between),
        })
    }

    fn flat(daily: f64, confidence: u8) -> Self {
        Self {
            daily_average: daily,
            monthly_prediction: daily * PROJECTION_DAYS,
            trend: Trend::Stable,
            confidence,
        }
    }
}

/// Compare the mean of the first `floor(n/2)` days against the rest
fn classify_trend(points: &[DayPoint]) -> Trend {
    let split = points.len() / 2;
    let (first, second) = points.split_at(split);

    let first_avg = first.iter().map(|p| p.y).sum::<f64>() / first.len() as f64;
    let second_avg = second.iter().map(|p| p.y).sum::<f64>() / second.len() as f64;

    if second_avg > first_avg * 1.1 {
        Trend::Increasing
    } else if second_avg < first_avg * 0.9 {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

fn confidence(distinct_days: usize, days_between: i64) -> u8 {
    let score = 30 + 5 * distinct_days as i64 + 2 * days_between;
    score.min(MAX_CONFIDENCE as i64) as u8
}
