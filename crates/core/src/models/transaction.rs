use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::month_range;

/// Type of ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in (dues, ticket sales, sponsorship, ...)
    Income,
    /// Money going out (venue rental, costumes, equipment, ...)
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// Sort order for transaction listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionSortOrder {
    /// Newest date first (default for display)
    DateDesc,
    /// Oldest date first
    DateAsc,
    /// Largest amount first
    AmountDesc,
    /// Smallest amount first
    AmountAsc,
}

/// A single income/expense record in the group ledger.
///
/// Amounts are always non-negative — the sign of a movement is carried
/// by `transaction_type`, not by `amount`. Every transaction belongs to
/// a category (e.g., "dues", "practice"), which feeds the per-category
/// expense breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Income or Expense
    pub transaction_type: TransactionType,

    /// Spending/income category name (e.g., "dues", "venue")
    pub category: String,

    /// Amount of money moved (always ≥ 0)
    pub amount: f64,

    /// Date of the transaction (no time component — daily granularity)
    pub date: NaiveDate,

    /// Optional free-text description (e.g., "March venue rental")
    #[serde(default)]
    pub description: Option<String>,

    /// Who fronted the money, if anyone (for later reimbursement)
    #[serde(default)]
    pub paid_by: Option<String>,

    /// Receipt reference or note, if one was kept
    #[serde(default)]
    pub receipt_note: Option<String>,
}

impl Transaction {
    pub fn new(
        transaction_type: TransactionType,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_type,
            category: category.into(),
            amount,
            date,
            description: None,
            paid_by: None,
            receipt_note: None,
        }
    }

    /// Create a transaction with a description attached.
    pub fn with_description(
        transaction_type: TransactionType,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_type,
            category: category.into(),
            amount,
            date,
            description: Some(description.into()),
            paid_by: None,
            receipt_note: None,
        }
    }

    /// `"YYYY-MM"` key of the calendar month this transaction falls in.
    #[must_use]
    pub fn month_key(&self) -> String {
        month_range::month_key(self.date)
    }
}
