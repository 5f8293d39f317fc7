//! Prediction output formatting
//!
//! Renders a [`PredictionResult`] as a currency estimate with its fixed
//! ± band, e.g. `$1,234.57 per ton ± $100.00`.

use crate::models::PredictionResult;

/// Default currency for estimates
pub const DEFAULT_CURRENCY: &str = "USD";

/// Default unit of mass the estimate refers to
pub const DEFAULT_UNIT: &str = "ton";

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// ISO currency code (USD, EUR, GBP or any other code)
    pub currency: String,
    /// Unit the cost is quoted per
    pub unit: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            unit: DEFAULT_UNIT.to_string(),
        }
    }
}

/// Formats prediction results for display
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    config: OutputConfig,
}

impl ReportFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Format the estimate with its uncertainty band
    pub fn format(&self, result: &PredictionResult) -> String {
        format!(
            "{} per {} ± {}",
            self.format_estimate(result),
            self.config.unit,
            format_currency(result.uncertainty, &self.config.currency)
        )
    }

    /// Format just the estimate
    pub fn format_estimate(&self, result: &PredictionResult) -> String {
        format_currency(result.estimate, &self.config.currency)
    }
}

/// Format an amount with two decimals and thousands separators
pub fn format_currency(amount: f64, currency: &str) -> String {
    let digits = group_thousands(amount.abs());
    let sign = if amount < 0.0 && digits != "0.00" { "-" } else { "" };
    match currency {
        "USD" => format!("{}${}", sign, digits),
        "EUR" => format!("{}€{}", sign, digits),
        "GBP" => format!("{}£{}", sign, digits),
        _ => format!("{}{} {}", sign, digits, currency),
    }
}

fn group_thousands(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}.{}", grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_band() {
        let formatter = ReportFormatter::new();
        let result = PredictionResult {
            estimate: 1234.567,
            uncertainty: 100.0,
        };
        assert_eq!(formatter.format(&result), "$1,234.57 per ton ± $100.00");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_currency(0.0, "USD"), "$0.00");
        assert_eq!(format_currency(999.999, "USD"), "$1,000.00");
        assert_eq!(format_currency(1_234_567.8, "USD"), "$1,234,567.80");
        assert_eq!(format_currency(123456.0, "USD"), "$123,456.00");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(format_currency(-12.0, "USD"), "-$12.00");
        assert_eq!(format_currency(-4321.5, "EUR"), "-€4,321.50");
        assert_eq!(format_currency(-0.001, "USD"), "$0.00");
    }

    #[test]
    fn test_other_currencies() {
        assert_eq!(format_currency(10.0, "GBP"), "£10.00");
        assert_eq!(format_currency(10.0, "CHF"), "10.00 CHF");
    }

    #[test]
    fn test_custom_unit() {
        let formatter = ReportFormatter::with_config(OutputConfig {
            currency: "EUR".to_string(),
            unit: "tonne".to_string(),
        });
        let result = PredictionResult {
            estimate: 50.0,
            uncertainty: 5.0,
        };
        assert_eq!(formatter.format(&result), "€50.00 per tonne ± €5.00");
        assert_eq!(formatter.format_estimate(&result), "€50.00");
    }
}
