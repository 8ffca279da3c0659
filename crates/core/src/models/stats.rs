use serde::{Deserialize, Serialize};

/// Total spending in one category, with its share of all expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category name
    pub category: String,
    /// Display icon for the category (empty if the category is unregistered)
    pub icon: String,
    /// Summed expense amount for this category
    pub amount: f64,
    /// Rounded percentage of total expenses (0–100)
    pub ratio: f64,
}

/// Progress against the monthly budget limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    /// Spending so far this month
    pub spent: f64,
    /// The configured monthly limit
    pub limit: f64,
    /// Rounded percentage of the limit used, capped at 100
    pub percent: f64,
    /// Spending has reached or passed the limit
    pub is_over: bool,
    /// Spending has reached 80% of the limit
    pub is_warning: bool,
}
