//! SpendCast - personal spending analytics and short-horizon forecasting
//!
//! This library aggregates expense records into summary metrics and
//! projects the next 30 days of spending from a linear daily trend.
//! The analytics are pure functions over a slice of expenses; the
//! storage, suggestion, and extraction edges are thin collaborators.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (expenses, categories, money)
//! - `reports`: Metrics, forecast, monthly history, and budget status
//! - `storage`: Key-value persistence and the expense ledger
//! - `services`: Entry validation, receipt extraction, and saving tips
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers for the `spendcast` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use chrono::Utc;
//! use spendcast::reports::{Forecast, SpendingMetrics};
//!
//! let metrics = SpendingMetrics::compute(&expenses, Utc::now());
//! let forecast = Forecast::compute(&expenses);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SpendError, SpendResult};
