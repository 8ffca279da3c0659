use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// A spending/income category the group tracks (name plus a display icon).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category name, unique within a ledger (e.g., "dues", "venue")
    pub name: String,
    /// Emoji or short glyph shown next to the category
    pub icon: String,
}

impl Category {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
        }
    }
}

/// The main data container: the group's full transaction history.
///
/// Transactions are kept sorted by date (oldest first) so listings and
/// the forecast's chronological aggregation never need to re-sort.
/// Persistence, if any, belongs to the caller — this type is plain data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// All income/expense transactions, oldest first
    pub transactions: Vec<Transaction>,

    /// Categories available for new transactions, unique by name
    #[serde(default)]
    pub categories: Vec<Category>,

    /// Monthly spending cap, if the group has set one
    #[serde(default)]
    pub monthly_budget_limit: Option<f64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }
}
