//! Reports module for SpendCast
//!
//! The analytics engine: spending metrics, the daily/monthly forecast,
//! month-by-month history, and budget status. Every report is a pure
//! function of an expense snapshot and, where time matters, an explicit
//! reference instant.

pub mod budget_status;
pub mod forecast;
pub mod metrics;
pub mod monthly;

pub use budget_status::{BudgetLevel, BudgetStatus};
pub use forecast::{Forecast, Trend};
pub use metrics::{category_shares, daily_totals, CategoryShare, SpendingMetrics};
pub use monthly::{MonthTotal, MonthlyHistory, YearMonth};
