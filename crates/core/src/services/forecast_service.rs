use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::forecast::{ForecastResult, HealthLevel, MonthlyData};
use crate::models::transaction::{Transaction, TransactionType};
use crate::services::month_range::{month_key, month_label, month_range};
use crate::services::trend::LinearTrend;

/// Number of observed months in the chart window (current month plus
/// the 5 before it).
const ACTUAL_MONTHS: i32 = 6;

/// Number of extrapolated months appended after the actual window.
const FORECAST_MONTHS: i32 = 3;

/// Per-month income/expense totals accumulated during aggregation.
#[derive(Debug, Clone, Copy, Default)]
struct MonthTotals {
    income: f64,
    expense: f64,
}

/// Generates the budget forecast: monthly aggregation, trend fitting,
/// extrapolation, and health classification.
///
/// Pure business logic — no I/O, no clock reads, no shared state. Given
/// the same `(transactions, now)` it always produces the same result,
/// so it is safe to call from any number of threads.
pub struct ForecastService;

impl ForecastService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the full forecast for a transaction list.
    ///
    /// `now` is injected rather than read from the wall clock so the
    /// computation stays deterministic and testable. The list may be in
    /// any order and may be empty; the caller is expected to have
    /// already scoped it to the relevant group.
    ///
    /// Steps:
    /// 1. Build the 6-month actual window ending at `now`'s month
    /// 2. Aggregate transactions into per-month income/expense totals
    /// 3. Fit independent OLS trends to the income and expense series
    /// 4. Extrapolate the 3 months after the window (clamped, rounded)
    /// 5. Classify health from recent and forecast net profit
    #[must_use]
    pub fn generate(&self, transactions: &[Transaction], now: NaiveDate) -> ForecastResult {
        let actual_window = month_range(now, ACTUAL_MONTHS - 1, 0);
        let totals = aggregate_by_month(transactions, &actual_window);

        let actual: Vec<MonthlyData> = actual_window
            .iter()
            .map(|&month| {
                let t = totals.get(&month_key(month)).copied().unwrap_or_default();
                MonthlyData {
                    month: month_key(month),
                    label: month_label(month),
                    income: t.income,
                    expense: t.expense,
                    net_profit: t.income - t.expense,
                    is_forecast: false,
                }
            })
            .collect();

        let has_data = actual.iter().any(|m| m.income != 0.0 || m.expense != 0.0);

        let income_series: Vec<f64> = actual.iter().map(|m| m.income).collect();
        let expense_series: Vec<f64> = actual.iter().map(|m| m.expense).collect();
        let income_trend = LinearTrend::fit(&income_series);
        let expense_trend = LinearTrend::fit(&expense_series);

        // The forecast continues the index sequence established by the
        // actual window: x = 6, 7, 8 for the 3 months after it.
        let forecast: Vec<MonthlyData> = month_range(now, -1, FORECAST_MONTHS)
            .iter()
            .enumerate()
            .map(|(idx, &month)| {
                let x = (ACTUAL_MONTHS as usize + idx) as f64;
                let income = income_trend.predict(x).round();
                let expense = expense_trend.predict(x).round();
                MonthlyData {
                    month: month_key(month),
                    label: month_label(month),
                    income,
                    expense,
                    net_profit: income - expense,
                    is_forecast: true,
                }
            })
            .collect();

        let recent: Vec<f64> = actual
            .iter()
            .rev()
            .take(3)
            .rev()
            .map(|m| m.net_profit)
            .collect();
        let forecast_nets: Vec<f64> = forecast.iter().map(|m| m.net_profit).collect();

        let health_level = HealthLevel::classify(&recent, &forecast_nets, has_data);
        let health_message = if has_data {
            health_level.message().to_string()
        } else {
            String::new()
        };

        let forecast_avg_net_profit = if forecast_nets.is_empty() {
            0.0
        } else {
            (forecast_nets.iter().sum::<f64>() / forecast_nets.len() as f64).round()
        };

        debug!(
            transactions = transactions.len(),
            has_data,
            health = %health_level,
            "generated budget forecast"
        );

        let mut monthly = actual;
        monthly.extend(forecast);

        ForecastResult {
            monthly,
            health_level,
            health_message,
            forecast_avg_net_profit,
            has_data,
        }
    }
}

impl Default for ForecastService {
    fn default() -> Self {
        Self::new()
    }
}

/// Sum transaction amounts into per-month income/expense buckets.
///
/// Every month in `window` is pre-seeded at zero so empty months appear
/// with zero totals rather than being absent. Transactions outside the
/// window are silently skipped — the caller is expected to pre-filter
/// by date range, but out-of-window rows must never cause a failure.
fn aggregate_by_month(
    transactions: &[Transaction],
    window: &[NaiveDate],
) -> HashMap<String, MonthTotals> {
    let mut totals: HashMap<String, MonthTotals> = window
        .iter()
        .map(|&month| (month_key(month), MonthTotals::default()))
        .collect();

    for transaction in transactions {
        let Some(bucket) = totals.get_mut(&transaction.month_key()) else {
            continue;
        };
        match transaction.transaction_type {
            TransactionType::Income => bucket.income += transaction.amount,
            TransactionType::Expense => bucket.expense += transaction.amount,
        }
    }

    totals
}
