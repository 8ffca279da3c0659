use serde::{Deserialize, Serialize};

/// One bar of the budget chart: a single calendar month's totals.
///
/// The core generates these — the frontend just renders them, using
/// `is_forecast` to distinguish extrapolated bars from observed ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyData {
    /// `"YYYY-MM"` key identifying the calendar month
    pub month: String,

    /// Display label (e.g., "Sep 2023")
    pub label: String,

    /// Total income for this month (≥ 0)
    pub income: f64,

    /// Total expense for this month (≥ 0)
    pub expense: f64,

    /// income - expense (may be negative)
    pub net_profit: f64,

    /// `true` for extrapolated months, `false` for observed ones
    pub is_forecast: bool,
}

/// Coarse financial-health verdict derived from recent and forecast
/// net profit.
///
/// Each level carries its own fixed banner message so level and message
/// can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthLevel {
    /// Net profit is positive and not trending down
    Stable,
    /// Recent net profit is trending downward
    Caution,
    /// Recent deficit, or all forecast months run a deficit
    Risk,
}

impl std::fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthLevel::Stable => write!(f, "Stable"),
            HealthLevel::Caution => write!(f, "Caution"),
            HealthLevel::Risk => write!(f, "Risk"),
        }
    }
}

impl HealthLevel {
    /// Classify financial health from the last 3 actual months' net
    /// profits (chronological, most recent last) and the 3 forecast
    /// months' net profits.
    ///
    /// Rules, in priority order:
    /// 1. `Risk` — every forecast month runs a deficit, or any recent
    ///    actual month did.
    /// 2. `Caution` — the most recent value is strictly below the
    ///    earliest of the recent values (the middle value is not
    ///    inspected; a dip-then-recovery reads as Stable).
    /// 3. `Stable` — everything else, including when there is no data.
    #[must_use]
    pub fn classify(recent: &[f64], forecast: &[f64], has_data: bool) -> Self {
        if !has_data {
            return HealthLevel::Stable;
        }

        let all_forecast_negative = !forecast.is_empty() && forecast.iter().all(|&n| n < 0.0);
        let any_recent_negative = recent.iter().any(|&n| n < 0.0);

        if all_forecast_negative || any_recent_negative {
            return HealthLevel::Risk;
        }

        if recent.len() >= 2 {
            let first = recent[0];
            let last = recent[recent.len() - 1];
            if last < first {
                return HealthLevel::Caution;
            }
        }

        HealthLevel::Stable
    }

    /// The fixed banner message for this level.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            HealthLevel::Stable => "net profit has remained positive",
            HealthLevel::Caution => "recent net profit is trending downward, review spending",
            HealthLevel::Risk => {
                "net profit is negative or all of the next three months are forecast to run a deficit"
            }
        }
    }
}

/// The complete forecast output: 6 actual months followed by 3
/// extrapolated ones, plus the health verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Strictly chronological months — 6 actual, then 3 forecast
    pub monthly: Vec<MonthlyData>,

    /// The health verdict
    pub health_level: HealthLevel,

    /// Banner message for `health_level`; empty when `has_data` is false
    pub health_message: String,

    /// Rounded average of the 3 forecast months' net profit
    pub forecast_avg_net_profit: f64,

    /// `true` iff any actual-window month has nonzero income or expense
    pub has_data: bool,
}
