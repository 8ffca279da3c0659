pub mod errors;
pub mod models;
pub mod services;

use chrono::NaiveDate;
use uuid::Uuid;

use errors::CoreError;
use models::{
    forecast::ForecastResult,
    ledger::{Category, Ledger},
    stats::{BudgetProgress, CategoryTotal},
    transaction::{Transaction, TransactionSortOrder, TransactionType},
};
use services::{forecast_service::ForecastService, month_range};

/// Main entry point for the group-finance core library.
///
/// Holds the group's transaction ledger and the forecast service that
/// operates on it. The frontend renders what this produces; all the
/// numbers are computed here.
#[must_use]
pub struct FinanceTracker {
    ledger: Ledger,
    forecast_service: ForecastService,
}

impl std::fmt::Debug for FinanceTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceTracker")
            .field("transactions", &self.ledger.transactions.len())
            .finish()
    }
}

impl FinanceTracker {
    /// Create a tracker with an empty ledger.
    pub fn create_new() -> Self {
        Self::build(Ledger::new())
    }

    /// Create a tracker from an existing transaction list (e.g., rows
    /// already fetched and scoped by the data layer). Each transaction
    /// is validated; the list may arrive in any order.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Result<Self, CoreError> {
        let mut tracker = Self::build(Ledger::new());
        for transaction in transactions {
            tracker.insert_transaction(transaction)?;
        }
        Ok(tracker)
    }

    // ── Transaction Management ──────────────────────────────────────

    /// Add a transaction to the ledger. Validates the amount before
    /// committing (must be finite and non-negative).
    pub fn add_transaction(
        &mut self,
        transaction_type: TransactionType,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Result<Uuid, CoreError> {
        let transaction = Transaction::new(transaction_type, category, amount, date);
        let id = transaction.id;
        self.insert_transaction(transaction)?;
        Ok(id)
    }

    /// Add a transaction with a description attached.
    pub fn add_transaction_with_description(
        &mut self,
        transaction_type: TransactionType,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Result<Uuid, CoreError> {
        let transaction =
            Transaction::with_description(transaction_type, category, amount, date, description);
        let id = transaction.id;
        self.insert_transaction(transaction)?;
        Ok(id)
    }

    /// Remove a transaction by its ID. Returns the removed transaction.
    pub fn remove_transaction(&mut self, transaction_id: Uuid) -> Result<Transaction, CoreError> {
        let idx = self
            .ledger
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))?;
        Ok(self.ledger.transactions.remove(idx))
    }

    /// Update an existing transaction by its ID. Validates the new
    /// state before committing; the ID is preserved.
    pub fn update_transaction(
        &mut self,
        transaction_id: Uuid,
        transaction_type: TransactionType,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        description: Option<String>,
    ) -> Result<(), CoreError> {
        Self::validate_amount(amount)?;

        let idx = self
            .ledger
            .transactions
            .iter()
            .position(|t| t.id == transaction_id)
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))?;

        // Take the old transaction out, apply changes, re-insert in
        // date order (the new date may move it).
        let old = self.ledger.transactions.remove(idx);
        let updated = Transaction {
            id: old.id,
            transaction_type,
            category: category.into(),
            amount,
            date,
            description,
            paid_by: old.paid_by,
            receipt_note: old.receipt_note,
        };
        Self::binary_insert(&mut self.ledger.transactions, updated);
        Ok(())
    }

    /// Get a single transaction by its ID.
    #[must_use]
    pub fn get_transaction(&self, transaction_id: Uuid) -> Option<&Transaction> {
        self.ledger
            .transactions
            .iter()
            .find(|t| t.id == transaction_id)
    }

    /// Get all transactions, oldest first (the ledger's storage order).
    #[must_use]
    pub fn get_transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    /// Get transactions sorted by a specific order.
    #[must_use]
    pub fn get_transactions_sorted(&self, order: &TransactionSortOrder) -> Vec<&Transaction> {
        let mut transactions: Vec<&Transaction> = self.ledger.transactions.iter().collect();
        match order {
            TransactionSortOrder::DateDesc => transactions.reverse(),
            TransactionSortOrder::DateAsc => {}
            TransactionSortOrder::AmountDesc => transactions.sort_by(|a, b| {
                b.amount
                    .partial_cmp(&a.amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            TransactionSortOrder::AmountAsc => transactions.sort_by(|a, b| {
                a.amount
                    .partial_cmp(&b.amount)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
        transactions
    }

    /// Get transactions filtered by type (Income or Expense).
    #[must_use]
    pub fn get_transactions_by_type(&self, transaction_type: TransactionType) -> Vec<&Transaction> {
        self.ledger
            .transactions
            .iter()
            .filter(|t| t.transaction_type == transaction_type)
            .collect()
    }

    /// Get transactions within a date range (inclusive).
    #[must_use]
    pub fn get_transactions_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Transaction> {
        self.ledger
            .transactions
            .iter()
            .filter(|t| t.date >= from && t.date <= to)
            .collect()
    }

    /// Search transactions by matching the query against descriptions
    /// (case-insensitive).
    #[must_use]
    pub fn search_transactions(&self, query: &str) -> Vec<&Transaction> {
        let q = query.to_lowercase();
        self.ledger
            .transactions
            .iter()
            .filter(|t| {
                t.description
                    .as_deref()
                    .unwrap_or("")
                    .to_lowercase()
                    .contains(&q)
            })
            .collect()
    }

    /// Total number of transactions in the ledger.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.ledger.transactions.len()
    }

    /// Date of the earliest transaction, if any.
    #[must_use]
    pub fn earliest_transaction_date(&self) -> Option<NaiveDate> {
        self.ledger.transactions.first().map(|t| t.date)
    }

    /// Date of the most recent transaction, if any.
    #[must_use]
    pub fn latest_transaction_date(&self) -> Option<NaiveDate> {
        self.ledger.transactions.last().map(|t| t.date)
    }

    // ── Totals ──────────────────────────────────────────────────────

    /// Sum of all income transactions.
    #[must_use]
    pub fn total_income(&self) -> f64 {
        self.sum_by_type(TransactionType::Income)
    }

    /// Sum of all expense transactions.
    #[must_use]
    pub fn total_expense(&self) -> f64 {
        self.sum_by_type(TransactionType::Expense)
    }

    /// Overall balance: total income minus total expense.
    #[must_use]
    pub fn net_balance(&self) -> f64 {
        self.total_income() - self.total_expense()
    }

    // ── Categories & Budget Limit ───────────────────────────────────

    /// Register a new category. Returns `false` (without adding) when a
    /// category with the same name already exists.
    pub fn add_category(
        &mut self,
        name: impl Into<String>,
        icon: impl Into<String>,
    ) -> bool {
        let name = name.into();
        if self.ledger.categories.iter().any(|c| c.name == name) {
            return false;
        }
        self.ledger.categories.push(Category::new(name, icon));
        true
    }

    /// Remove a category by name. Returns `false` if no such category
    /// exists. Transactions already recorded under the name keep it.
    pub fn remove_category(&mut self, name: &str) -> bool {
        let before = self.ledger.categories.len();
        self.ledger.categories.retain(|c| c.name != name);
        self.ledger.categories.len() < before
    }

    /// All registered categories, in insertion order.
    #[must_use]
    pub fn get_categories(&self) -> &[Category] {
        &self.ledger.categories
    }

    /// Set or clear the monthly spending cap. A limit must be a finite,
    /// non-negative number; pass `None` to clear it.
    pub fn set_monthly_budget_limit(&mut self, limit: Option<f64>) -> Result<(), CoreError> {
        if let Some(limit) = limit {
            Self::validate_amount(limit)?;
        }
        self.ledger.monthly_budget_limit = limit;
        Ok(())
    }

    /// The configured monthly spending cap, if any.
    #[must_use]
    pub fn monthly_budget_limit(&self) -> Option<f64> {
        self.ledger.monthly_budget_limit
    }

    /// Sum of expenses in the calendar month containing `now`. Income
    /// and other months are ignored.
    #[must_use]
    pub fn monthly_spending(&self, now: NaiveDate) -> f64 {
        let key = month_range::month_key(now);
        self.ledger
            .transactions
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Expense && t.month_key() == key)
            .map(|t| t.amount)
            .sum()
    }

    /// Progress against the monthly budget limit, or `None` when no
    /// positive limit is set. The percentage is rounded and capped at
    /// 100; 80% flags a warning and 100% flags the limit as exceeded.
    #[must_use]
    pub fn budget_progress(&self, now: NaiveDate) -> Option<BudgetProgress> {
        let limit = self.ledger.monthly_budget_limit.filter(|&l| l > 0.0)?;
        let spent = self.monthly_spending(now);
        let percent = ((spent / limit) * 100.0).round().min(100.0);
        Some(BudgetProgress {
            spent,
            limit,
            percent,
            is_over: percent >= 100.0,
            is_warning: percent >= 80.0,
        })
    }

    /// Total expenses per category, largest first. Each entry carries
    /// its rounded share of all expenses and the category's icon (empty
    /// when spending was recorded under an unregistered name).
    #[must_use]
    pub fn category_breakdown(&self) -> Vec<CategoryTotal> {
        let mut totals: Vec<(String, f64)> = Vec::new();
        for transaction in &self.ledger.transactions {
            if transaction.transaction_type != TransactionType::Expense {
                continue;
            }
            match totals.iter_mut().find(|(name, _)| *name == transaction.category) {
                Some((_, amount)) => *amount += transaction.amount,
                None => totals.push((transaction.category.clone(), transaction.amount)),
            }
        }

        let total_expense: f64 = totals.iter().map(|(_, amount)| amount).sum();
        let mut breakdown: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, amount)| {
                let icon = self
                    .ledger
                    .categories
                    .iter()
                    .find(|c| c.name == category)
                    .map(|c| c.icon.clone())
                    .unwrap_or_default();
                let ratio = if total_expense > 0.0 {
                    ((amount / total_expense) * 100.0).round()
                } else {
                    0.0
                };
                CategoryTotal {
                    category,
                    icon,
                    amount,
                    ratio,
                }
            })
            .collect();
        breakdown.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        breakdown
    }

    // ── Forecast ────────────────────────────────────────────────────

    /// Compute the budget forecast anchored at `now`.
    ///
    /// `now` is injected so the computation is deterministic: the same
    /// clock value and ledger always yield the same result. Never
    /// fails — an empty ledger produces an all-zero window with
    /// `has_data == false`.
    #[must_use]
    pub fn forecast(&self, now: NaiveDate) -> ForecastResult {
        self.forecast_service
            .generate(&self.ledger.transactions, now)
    }

    /// Compute the budget forecast anchored at today (UTC).
    #[must_use]
    pub fn forecast_now(&self) -> ForecastResult {
        self.forecast(chrono::Utc::now().date_naive())
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export all transactions as a JSON string.
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.ledger.transactions).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize transactions to JSON: {e}"))
        })
    }

    /// Import transactions from a JSON string. All transactions are
    /// validated first; if any fails, none are added (all-or-nothing).
    /// Returns the number of transactions imported.
    pub fn import_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let transactions: Vec<Transaction> = serde_json::from_str(json)?;
        for transaction in &transactions {
            Self::validate_amount(transaction.amount)?;
        }

        let count = transactions.len();
        for transaction in transactions {
            Self::binary_insert(&mut self.ledger.transactions, transaction);
        }
        Ok(count)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(ledger: Ledger) -> Self {
        Self {
            ledger,
            forecast_service: ForecastService::new(),
        }
    }

    fn insert_transaction(&mut self, transaction: Transaction) -> Result<(), CoreError> {
        Self::validate_amount(transaction.amount)?;
        Self::binary_insert(&mut self.ledger.transactions, transaction);
        Ok(())
    }

    fn validate_amount(amount: f64) -> Result<(), CoreError> {
        if !amount.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Amount must be a finite number, got {amount}"
            )));
        }
        if amount < 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be non-negative, got {amount} (record a refund as the opposite type instead)"
            )));
        }
        Ok(())
    }

    /// Insert keeping the ledger sorted by date, oldest first
    /// (O(log n) position search).
    fn binary_insert(transactions: &mut Vec<Transaction>, transaction: Transaction) {
        let pos = transactions
            .binary_search_by_key(&transaction.date, |t| t.date)
            .unwrap_or_else(|pos| pos);
        transactions.insert(pos, transaction);
    }

    fn sum_by_type(&self, transaction_type: TransactionType) -> f64 {
        self.ledger
            .transactions
            .iter()
            .filter(|t| t.transaction_type == transaction_type)
            .map(|t| t.amount)
            .sum()
    }
}

impl Default for FinanceTracker {
    fn default() -> Self {
        Self::create_new()
    }
}
