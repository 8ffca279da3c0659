//! Ordinary-least-squares trend fitting over an equally spaced series.

/// A fitted line `y = intercept + slope * x`, where `x` is the
/// zero-based index of each point in the series (the month index, not
/// the calendar value).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearTrend {
    /// Fit a least-squares line to `values`.
    ///
    /// With fewer than two points there is no spread in x, so the fit
    /// degenerates to a flat line through the mean (slope 0). An empty
    /// series fits the zero line.
    #[must_use]
    pub fn fit(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self {
                slope: 0.0,
                intercept: 0.0,
            };
        }

        let x_mean = (n as f64 - 1.0) / 2.0;
        let y_mean = values.iter().sum::<f64>() / n as f64;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (i, y) in values.iter().enumerate() {
            let dx = i as f64 - x_mean;
            numerator += dx * (y - y_mean);
            denominator += dx * dx;
        }

        let slope = if denominator == 0.0 {
            0.0
        } else {
            numerator / denominator
        };

        Self {
            slope,
            intercept: y_mean - slope * x_mean,
        }
    }

    /// Predict the value at index `x`, clamped at zero — income and
    /// expense are non-negative by definition, so a steep downward
    /// trend bottoms out instead of extrapolating below zero.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        (self.intercept + self.slope * x).max(0.0)
    }
}
