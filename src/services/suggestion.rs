//! Saving-tip suggestions
//!
//! The biggest spending categories are each sent to a [`TipProvider`] as an
//! independent task. A category whose tip fails gets a generic fallback
//! instead; it never holds up or discards the others.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use serde::Serialize;

use crate::error::{SpendError, SpendResult};
use crate::models::{Expense, ExpenseCategory, Money};
use crate::reports::metrics::category_shares;

/// Number of top categories that get a tip
pub const MAX_SUGGESTION_CATEGORIES: usize = 3;

/// Number of recent expenses quoted per category
pub const RECENT_EXPENSES_PER_CATEGORY: usize = 10;

/// One recent expense quoted in a tip request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentExpense {
    pub description: String,
    pub amount: Money,
}

/// Everything a provider needs to write one category's tip
#[derive(Debug, Clone, PartialEq)]
pub struct TipRequest {
    pub category: ExpenseCategory,
    pub amount: Money,
    /// Share of total spending (0-100)
    pub percentage: f64,
    /// Most recently recorded expenses in this category, oldest first
    pub recent: Vec<RecentExpense>,
}

impl TipRequest {
    /// Natural-language prompt for a text model
    pub fn prompt(&self) -> String {
        let details: Vec<String> = self
            .recent
            .iter()
            .map(|e| {
                let description = if e.description.is_empty() {
                    "No description"
                } else {
                    e.description.as_str()
                };
                format!("- {}: {}", e.amount, description)
            })
            .collect();

        format!(
            "I'm tracking my budget and spent {amount} ({pct:.1}% of my total spending) on {cat}.\n\n\
             Recent {cat} expenses:\n{details}\n\n\
             Give me ONE personalized money-saving tip based on these expenses. \
             Be specific, practical, and mention estimated savings. Keep it to 2-3 sentences.",
            amount = self.amount,
            pct = self.percentage,
            cat = self.category,
            details = details.join("\n"),
        )
    }

    fn empty_tip_fallback(&self) -> String {
        format!(
            "Review your {} spending for savings opportunities.",
            self.category
        )
    }

    fn failure_fallback(&self) -> String {
        format!(
            "You spent {} on {}. Look for ways to optimize. (Tip generation failed)",
            self.amount, self.category
        )
    }
}

/// Source of saving tips, typically a hosted text model
pub trait TipProvider: Sync {
    fn tip(&self, request: &TipRequest) -> SpendResult<String>;
}

/// Where a suggestion's text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipOrigin {
    Provider,
    Fallback,
}

/// A tip for one spending category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub category: ExpenseCategory,
    pub amount: Money,
    pub percentage: f64,
    pub tip: String,
    pub origin: TipOrigin,
}

/// Build tip requests for the top spending categories
pub fn build_tip_requests(expenses: &[Expense]) -> Vec<TipRequest> {
    let mut shares = category_shares(expenses);
    shares.truncate(MAX_SUGGESTION_CATEGORIES);

    shares
        .into_iter()
        .map(|share| {
            let in_category: Vec<&Expense> = expenses
                .iter()
                .filter(|e| e.category == share.category)
                .collect();
            let skip = in_category.len().saturating_sub(RECENT_EXPENSES_PER_CATEGORY);
            let recent = in_category[skip..]
                .iter()
                .map(|e| RecentExpense {
                    description: e.description.clone(),
                    amount: e.amount,
                })
                .collect();

            TipRequest {
                category: share.category,
                amount: share.amount,
                percentage: share.percentage,
                recent,
            }
        })
        .collect()
}

/// Ask `provider` for a tip per top category, concurrently
///
/// Results come back in category order. Failed or panicked tasks fall back
/// to a generic tip mentioning the amount spent.
pub fn generate_suggestions<P: TipProvider>(expenses: &[Expense], provider: &P) -> Vec<Suggestion> {
    let requests = build_tip_requests(expenses);

    thread::scope(|scope| {
        let handles: Vec<_> = requests
            .iter()
            .map(|request| scope.spawn(move || provider.tip(request)))
            .collect();

        requests
            .iter()
            .zip(handles)
            .map(|(request, handle)| {
                let outcome = handle.join().unwrap_or_else(|_| {
                    Err(SpendError::Suggestion("tip task panicked".into()))
                });
                resolve(request, outcome)
            })
            .collect()
    })
}

fn resolve(request: &TipRequest, outcome: SpendResult<String>) -> Suggestion {
    let (tip, origin) = match outcome {
        Ok(tip) if !tip.trim().is_empty() => (tip.trim().to_string(), TipOrigin::Provider),
        Ok(_) => (request.empty_tip_fallback(), TipOrigin::Fallback),
        Err(e) => {
            tracing::warn!(category = %request.category, error = %e, "tip generation failed");
            (request.failure_fallback(), TipOrigin::Fallback)
        }
    };

    Suggestion {
        category: request.category,
        amount: request.amount,
        percentage: request.percentage,
        tip,
        origin,
    }
}

/// Runs an external command with the prompt on stdin and uses its stdout
#[derive(Debug, Clone)]
pub struct CommandTipProvider {
    program: String,
    args: Vec<String>,
}

impl CommandTipProvider {
    /// Split a command line on whitespace into program and arguments
    pub fn parse(command_line: &str) -> SpendResult<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| SpendError::Config("Suggestion command is empty".into()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl TipProvider for CommandTipProvider {
    fn tip(&self, request: &TipRequest) -> SpendResult<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                SpendError::Suggestion(format!("Failed to start '{}': {}", self.program, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(request.prompt().as_bytes()) {
                drop(stdin);
                let _ = child.kill();
                let _ = child.wait();
                return Err(SpendError::Suggestion(format!("Failed to send prompt: {}", e)));
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| SpendError::Suggestion(format!("Failed to read tip: {}", e)))?;

        if !output.status.success() {
            return Err(SpendError::Suggestion(format!(
                "'{}' exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
