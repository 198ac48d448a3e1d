//! Expense model
//!
//! An expense is a dated, categorized, positive amount. Records are never
//! edited after creation; the collection only grows or is cleared.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::ids::ExpenseId;
use super::money::Money;

/// Amounts must be strictly below this value
pub const MAX_AMOUNT: Money = Money::from_dollars(10_000);

/// Maximum description length for machine-extracted expenses
pub const MAX_DESCRIPTION_LEN: usize = 50;

/// An expense that has not yet been given an ID and a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub amount: Money,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub description: String,
}

impl ExpenseDraft {
    pub fn new(amount: Money, category: ExpenseCategory, description: impl Into<String>) -> Self {
        Self {
            amount,
            category,
            description: description.into(),
        }
    }

    /// Check the amount invariant `0 < amount < MAX_AMOUNT`
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        check_amount(self.amount)
    }

    /// Turn the draft into a recorded expense with a fresh ID
    pub fn into_expense(self, date: DateTime<Utc>) -> Expense {
        Expense {
            id: ExpenseId::new(),
            amount: self.amount,
            category: self.category,
            description: self.description,
            date,
        }
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: Money,
    pub category: ExpenseCategory,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
}

fn check_amount(amount: Money) -> Result<(), ExpenseValidationError> {
    if !amount.is_positive() {
        return Err(ExpenseValidationError::NonPositiveAmount(amount));
    }
    if amount >= MAX_AMOUNT {
        return Err(ExpenseValidationError::AmountTooLarge(amount));
    }
    Ok(())
}

impl Expense {
    /// Create an expense directly, bypassing validation
    pub fn new(
        amount: Money,
        category: ExpenseCategory,
        description: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        ExpenseDraft::new(amount, category, description).into_expense(date)
    }

    /// Same amount bounds as [`ExpenseDraft::validate`], for records read back from storage
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        check_amount(self.amount)
    }

    /// Calendar day of the expense (UTC), time of day discarded
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.day().format("%Y-%m-%d"),
            self.category,
            self.description,
            self.amount
        )
    }
}

/// Validation errors for expense input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount must be less than {} (got {})", MAX_AMOUNT, amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
