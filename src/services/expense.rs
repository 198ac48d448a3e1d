//! Expense service
//!
//! Validates new expenses before they reach the ledger. Batches are
//! validated item by item: bad items are reported, good ones are kept.

use chrono::{DateTime, Utc};

use crate::error::{SpendError, SpendResult};
use crate::models::{Expense, ExpenseCategory, ExpenseDraft};
use crate::storage::{ExpenseLedger, KeyValueStore};

/// A batch item that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// Position of the item in the submitted batch
    pub index: usize,
    pub reason: String,
}

/// Result of adding a batch of drafts
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub added: Vec<Expense>,
    pub rejected: Vec<Rejection>,
}

/// Options for listing expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<ExpenseCategory>,
    /// Keep only the most recent `limit` matches
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Service for recording and listing expenses
pub struct ExpenseService<'a, S> {
    ledger: &'a ExpenseLedger<S>,
}

impl<'a, S: KeyValueStore> ExpenseService<'a, S> {
    pub fn new(ledger: &'a ExpenseLedger<S>) -> Self {
        Self { ledger }
    }

    /// Record a single manually entered expense
    pub fn add(&self, draft: ExpenseDraft, date: DateTime<Utc>) -> SpendResult<Expense> {
        draft
            .validate()
            .map_err(|e| SpendError::Validation(e.to_string()))?;

        let expense = draft.into_expense(date);
        self.ledger.append(vec![expense.clone()])?;
        tracing::debug!(id = %expense.id, amount = %expense.amount, "expense recorded");
        Ok(expense)
    }

    /// Record every valid draft, all dated `date`, and report the rest
    pub fn add_batch(
        &self,
        drafts: Vec<ExpenseDraft>,
        date: DateTime<Utc>,
    ) -> SpendResult<BatchOutcome> {
        let mut added = Vec::new();
        let mut rejected = Vec::new();

        for (index, draft) in drafts.into_iter().enumerate() {
            match draft.validate() {
                Ok(()) => added.push(draft.into_expense(date)),
                Err(e) => rejected.push(Rejection {
                    index,
                    reason: e.to_string(),
                }),
            }
        }

        if !added.is_empty() {
            self.ledger.append(added.clone())?;
        }
        if !rejected.is_empty() {
            tracing::warn!(count = rejected.len(), "rejected invalid expenses in batch");
        }

        Ok(BatchOutcome { added, rejected })
    }

    /// List expenses, newest first
    pub fn list(&self, filter: &ExpenseFilter) -> SpendResult<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self
            .ledger
            .expenses()?
            .into_iter()
            .filter(|e| filter.category.map_or(true, |c| e.category == c))
            .collect();

        // Stable sort keeps insertion order for equal dates
        expenses.sort_by(|a, b| b.date.cmp(&a.date));

        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }
        Ok(expenses)
    }

    /// Delete every expense
    pub fn clear(&self) -> SpendResult<()> {
        self.ledger.clear()
    }
}
