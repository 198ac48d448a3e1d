//! Expense ledger
//!
//! The append-only expense collection and the monthly budget limit, kept in
//! a [`KeyValueStore`] as JSON under two fixed keys. Every mutation rewrites
//! the whole collection; callers recompute reports from the returned list.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::SpendError;
use crate::models::{Expense, Money};

use super::store::KeyValueStore;

/// Key holding the JSON array of expenses
pub const EXPENSES_KEY: &str = "budget-expenses";

/// Key holding the monthly budget limit as a decimal string
pub const BUDGET_LIMIT_KEY: &str = "budget-limit";

/// Budget limit used until the user sets one
pub const DEFAULT_BUDGET_LIMIT: Money = Money::from_dollars(2000);

pub struct ExpenseLedger<S> {
    store: S,
}

impl<S: KeyValueStore> ExpenseLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load every expense in insertion order
    ///
    /// A missing key is an empty ledger. A corrupt one is an error, and so is
    /// a record that breaks the amount bounds or reuses another record's ID.
    pub fn expenses(&self) -> Result<Vec<Expense>, SpendError> {
        let Some(raw) = self.store.get(EXPENSES_KEY)? else {
            return Ok(Vec::new());
        };

        let expenses: Vec<Expense> = serde_json::from_str(&raw).map_err(|e| {
            SpendError::Storage(format!("Failed to parse stored expenses: {}", e))
        })?;
        check_stored(&expenses)?;
        Ok(expenses)
    }

    /// Append expenses and persist, returning the full updated collection
    pub fn append(&self, new_expenses: Vec<Expense>) -> Result<Vec<Expense>, SpendError> {
        let mut expenses = self.expenses()?;
        let added = new_expenses.len();
        expenses.extend(new_expenses);
        self.save(&expenses)?;
        tracing::info!(added, total = expenses.len(), "appended expenses");
        Ok(expenses)
    }

    /// Replace the collection with an empty one
    pub fn clear(&self) -> Result<(), SpendError> {
        self.save(&[])?;
        tracing::info!("cleared all expenses");
        Ok(())
    }

    /// The monthly budget limit, or the default if none is stored
    pub fn budget_limit(&self) -> Result<Money, SpendError> {
        let Some(raw) = self.store.get(BUDGET_LIMIT_KEY)? else {
            return Ok(DEFAULT_BUDGET_LIMIT);
        };

        match Money::parse(&raw) {
            Ok(limit) => Ok(limit),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable budget limit");
                Ok(DEFAULT_BUDGET_LIMIT)
            }
        }
    }

    /// Store a new monthly budget limit
    pub fn set_budget_limit(&self, limit: Money) -> Result<(), SpendError> {
        if !limit.is_positive() {
            return Err(SpendError::Validation(format!(
                "Budget limit must be greater than zero (got {})",
                limit
            )));
        }
        self.store.set(BUDGET_LIMIT_KEY, &limit.to_decimal_string())?;
        tracing::info!(limit = %limit, "budget limit updated");
        Ok(())
    }

    /// Expenses dated at or before `until`, for reports pinned to a past date
    pub fn expenses_until(&self, until: DateTime<Utc>) -> Result<Vec<Expense>, SpendError> {
        Ok(self
            .expenses()?
            .into_iter()
            .filter(|e| e.date <= until)
            .collect())
    }

    fn save(&self, expenses: &[Expense]) -> Result<(), SpendError> {
        let json = serde_json::to_string(expenses)?;
        self.store.set(EXPENSES_KEY, &json)
    }
}

fn check_stored(expenses: &[Expense]) -> Result<(), SpendError> {
    let mut seen = HashSet::with_capacity(expenses.len());
    for (index, expense) in expenses.iter().enumerate() {
        if let Err(e) = expense.validate() {
            tracing::warn!(index, id = %expense.id, error = %e, "invalid stored expense");
            return Err(SpendError::Storage(format!(
                "Stored expense {} ({}) is invalid: {}",
                index + 1,
                expense.id,
                e
            )));
        }
        if !seen.insert(expense.id) {
            tracing::warn!(index, id = %expense.id, "duplicate stored expense id");
            return Err(SpendError::Storage(format!(
                "Stored expense {} reuses ID {}",
                index + 1,
                expense.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseCategory;
    use crate::storage::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn ledger() -> ExpenseLedger<MemoryStore> {
        ExpenseLedger::new(MemoryStore::new())
    }

    fn expense(cents: i64, day: u32) -> Expense {
        Expense::new(
            Money::from_cents(cents),
            ExpenseCategory::Food,
            "Snack",
            Utc.with_ymd_and_hms(2025, 4, day, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = ledger();
        assert!(ledger.expenses().unwrap().is_empty());
        assert_eq!(ledger.budget_limit().unwrap(), DEFAULT_BUDGET_LIMIT);
    }

    #[test]
    fn test_append_preserves_order_and_identity() {
        let ledger = ledger();
        let first = expense(100, 1);
        let second = expense(200, 2);
        let third = expense(300, 3);

        ledger.append(vec![first.clone()]).unwrap();
        let all = ledger.append(vec![second.clone(), third.clone()]).unwrap();

        let ids: Vec<_> = all.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first.id, second.id, third.id]);
        assert_eq!(ledger.expenses().unwrap(), all);
    }

    #[test]
    fn test_clear() {
        let ledger = ledger();
        ledger.append(vec![expense(100, 1)]).unwrap();
        ledger.clear().unwrap();
        assert!(ledger.expenses().unwrap().is_empty());
        assert_eq!(ledger.store().get(EXPENSES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_corrupt_expenses_are_an_error() {
        let ledger = ledger();
        ledger.store().set(EXPENSES_KEY, "{not json").unwrap();
        assert!(matches!(ledger.expenses(), Err(SpendError::Storage(_))));
    }

    fn store_raw(ledger: &ExpenseLedger<MemoryStore>, expenses: &[Expense]) {
        let json = serde_json::to_string(expenses).unwrap();
        ledger.store().set(EXPENSES_KEY, &json).unwrap();
    }

    #[test]
    fn test_stored_amounts_out_of_bounds_are_an_error() {
        let ledger = ledger();
        for cents in [-500, 0, 1_000_000, i64::MAX] {
            store_raw(&ledger, &[expense(100, 1), expense(cents, 2)]);
            let err = ledger.expenses().unwrap_err();
            assert!(matches!(err, SpendError::Storage(_)), "{} cents loaded", cents);
            assert!(ledger.expenses_until(Utc::now()).is_err());
        }
    }

    #[test]
    fn test_stored_duplicate_ids_are_an_error() {
        let ledger = ledger();
        let first = expense(100, 1);
        let mut copy = expense(250, 2);
        copy.id = first.id;
        store_raw(&ledger, &[first, copy]);

        let err = ledger.expenses().unwrap_err();
        assert!(err.to_string().contains("reuses ID"));
        assert!(ledger.append(vec![expense(300, 3)]).is_err());
    }

    #[test]
    fn test_stored_max_amount_records_sum_without_overflow() {
        let ledger = ledger();
        let records: Vec<Expense> = (1..=28).map(|day| expense(999_999, day)).collect();
        store_raw(&ledger, &records);

        let loaded = ledger.expenses().unwrap();
        let total: Money = loaded.iter().map(|e| e.amount).sum();
        assert_eq!(total, Money::from_cents(999_999 * 28));
    }

    #[test]
    fn test_budget_limit_round_trip() {
        let ledger = ledger();
        ledger.set_budget_limit(Money::from_cents(150_050)).unwrap();
        assert_eq!(ledger.budget_limit().unwrap(), Money::from_cents(150_050));
        assert_eq!(
            ledger.store().get(BUDGET_LIMIT_KEY).unwrap().as_deref(),
            Some("1500.50")
        );
    }

    #[test]
    fn test_budget_limit_accepts_plain_numbers_and_rejects_zero() {
        let ledger = ledger();
        ledger.store().set(BUDGET_LIMIT_KEY, "1750").unwrap();
        assert_eq!(ledger.budget_limit().unwrap(), Money::from_dollars(1750));

        ledger.store().set(BUDGET_LIMIT_KEY, "lots").unwrap();
        assert_eq!(ledger.budget_limit().unwrap(), DEFAULT_BUDGET_LIMIT);

        assert!(ledger.set_budget_limit(Money::zero()).unwrap_err().is_validation());
    }

    #[test]
    fn test_expenses_until() {
        let ledger = ledger();
        ledger.append(vec![expense(100, 1), expense(200, 10)]).unwrap();

        let cutoff = Utc.with_ymd_and_hms(2025, 4, 5, 0, 0, 0).unwrap();
        let visible = ledger.expenses_until(cutoff).unwrap();
        assert_eq!(visible.len(), 1);

        let later = ledger.expenses_until(cutoff + Duration::days(30)).unwrap();
        assert_eq!(later.len(), 2);
    }
}
