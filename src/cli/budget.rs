//! Budget CLI commands
//!
//! Shows this month's spending against the monthly limit and updates the limit.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_budget_status;
use crate::error::{SpendError, SpendResult};
use crate::models::Money;
use crate::reports::{BudgetStatus, SpendingMetrics};
use crate::storage::{ExpenseLedger, KeyValueStore};

use super::snapshot;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show this month's spending against the limit
    Show {
        /// Report as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Set the monthly budget limit
    Set {
        /// Amount (e.g., "1500" or "1500.00")
        amount: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command<S: KeyValueStore>(
    ledger: &ExpenseLedger<S>,
    settings: &Settings,
    cmd: BudgetCommands,
) -> SpendResult<()> {
    match cmd {
        BudgetCommands::Show { as_of } => {
            let (now, expenses) = snapshot(ledger, as_of.as_deref())?;
            let metrics = SpendingMetrics::compute(&expenses, now);
            let status = BudgetStatus::compute(ledger.budget_limit()?, metrics.this_month);

            print!("{}", format_budget_status(&status, &settings.currency_symbol));
        }

        BudgetCommands::Set { amount } => {
            let limit =
                Money::parse(&amount).map_err(|e| SpendError::Validation(e.to_string()))?;
            ledger.set_budget_limit(limit)?;

            println!(
                "Monthly budget limit set to {}",
                limit.format_with_symbol(&settings.currency_symbol)
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_set_limit() {
        let ledger = ExpenseLedger::new(MemoryStore::new());
        handle_budget_command(
            &ledger,
            &Settings::default(),
            BudgetCommands::Set {
                amount: "1500".into(),
            },
        )
        .unwrap();
        assert_eq!(ledger.budget_limit().unwrap(), Money::from_dollars(1500));
    }

    #[test]
    fn test_set_rejects_zero_and_garbage() {
        let ledger = ExpenseLedger::new(MemoryStore::new());
        let settings = Settings::default();
        for amount in ["0", "lots"] {
            let result = handle_budget_command(
                &ledger,
                &settings,
                BudgetCommands::Set {
                    amount: amount.into(),
                },
            );
            assert!(result.is_err());
        }
        assert_eq!(ledger.budget_limit().unwrap(), Money::from_dollars(2000));
    }

    #[test]
    fn test_show_with_as_of() {
        let ledger = ExpenseLedger::new(MemoryStore::new());
        handle_budget_command(
            &ledger,
            &Settings::default(),
            BudgetCommands::Show {
                as_of: Some("2025-02-10".into()),
            },
        )
        .unwrap();
    }
}
