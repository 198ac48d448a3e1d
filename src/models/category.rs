//! Expense categories
//!
//! The category set is closed. Anything that does not name one of the known
//! categories is filed under [`ExpenseCategory::Other`], so malformed input can
//! never grow the set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spending category of an expense
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "String")]
pub enum ExpenseCategory {
    Food,
    Transportation,
    Utilities,
    Entertainment,
    Healthcare,
    #[default]
    Other,
}

impl ExpenseCategory {
    /// Every category, in display order
    pub const ALL: [ExpenseCategory; 6] = [
        Self::Food,
        Self::Transportation,
        Self::Utilities,
        Self::Entertainment,
        Self::Healthcare,
        Self::Other,
    ];

    /// The category name as stored and displayed
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transportation => "Transportation",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Healthcare => "Healthcare",
            Self::Other => "Other",
        }
    }

    /// Look up a category by name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Look up a category by name, falling back to `Other`
    pub fn parse_lenient(name: &str) -> Self {
        Self::from_name(name).unwrap_or(Self::Other)
    }
}

impl From<String> for ExpenseCategory {
    fn from(name: String) -> Self {
        Self::parse_lenient(&name)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
