//! Core data models for SpendCast
//!
//! Expenses, their categories, and the money type they are measured in.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::ExpenseCategory;
pub use expense::{Expense, ExpenseDraft, ExpenseValidationError, MAX_AMOUNT, MAX_DESCRIPTION_LEN};
pub use ids::ExpenseId;
pub use money::{Money, MoneyParseError};
