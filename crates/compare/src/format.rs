//! Display formatting for comparison rows.
//!
//! Absent or non-finite values render as the configured placeholder, never
//! as "0" or "NaN".

use equity_core::{config::DisplayConfig, Metric};

/// Formats metric values for display.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: DisplayConfig,
}

impl Formatter {
    /// Create a formatter.
    pub fn new(config: DisplayConfig) -> Self {
        Self { config }
    }

    /// Placeholder for absent values.
    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }

    /// Currency amount, e.g. `A$45.50`.
    pub fn currency(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return self.config.placeholder.clone();
        }
        format!("{}{:.*}", self.config.currency_prefix, decimals, value)
    }

    /// Percentage with an explicit `+` for non-negative values, e.g. `+12.3%`.
    pub fn signed_percent(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return self.config.placeholder.clone();
        }
        // -0.0 would otherwise print as "+-0.0"
        let value = if value == 0.0 { 0.0 } else { value };
        let sign = if value >= 0.0 { "+" } else { "" };
        format!("{}{:.*}%", sign, decimals, value)
    }

    /// Percentage without a forced sign, e.g. `4.50%`.
    pub fn percent(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return self.config.placeholder.clone();
        }
        format!("{:.*}%", decimals, value)
    }

    /// Plain decimal, e.g. a P/E ratio `15.00`.
    pub fn decimal(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return self.config.placeholder.clone();
        }
        format!("{:.*}", decimals, value)
    }

    /// Compact share volume: `1.23M`, `45.6K`, or a whole number below 1,000.
    pub fn volume(&self, value: f64) -> String {
        if !value.is_finite() {
            return self.config.placeholder.clone();
        }
        if value >= 1e6 {
            format!("{:.2}M", value / 1e6)
        } else if value >= 1e3 {
            format!("{:.1}K", value / 1e3)
        } else {
            format!("{:.0}", value)
        }
    }

    /// Apply `render` to a present metric, placeholder otherwise.
    pub fn optional(&self, metric: Metric, render: impl FnOnce(&Self, f64) -> String) -> String {
        match metric.value() {
            Some(value) => render(self, value),
            None => self.config.placeholder.clone(),
        }
    }
}
