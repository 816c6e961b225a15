use chrono::NaiveDate;
use spendboard_core::{date_range::DATE_FORMAT, CurrencyFormatter, DateFormatter};

/// Formatter implementations backed by the active CLI configuration.
#[derive(Debug, Clone)]
pub struct CliFormatters {
    currency: String,
    precision: usize,
}

impl CliFormatters {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            precision: 2,
        }
    }

    pub fn amount(&self, amount: f64) -> String {
        self.format_amount(amount, "")
    }

    /// Bare number with grouping, no currency code.
    pub fn number(&self, amount: f64) -> String {
        let rendered = format!("{:.prec$}", amount.abs(), prec = self.precision);
        let (int_part, frac_part) = rendered
            .split_once('.')
            .unwrap_or((rendered.as_str(), ""));
        let mut grouped = String::new();
        for (idx, ch) in int_part.chars().enumerate() {
            if idx > 0 && (int_part.len() - idx) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        let sign = if amount < 0.0 { "-" } else { "" };
        if frac_part.is_empty() {
            format!("{sign}{grouped}")
        } else {
            format!("{sign}{grouped}.{frac_part}")
        }
    }
}

impl CurrencyFormatter for CliFormatters {
    fn format_amount(&self, amount: f64, currency: &str) -> String {
        let code = if currency.is_empty() {
            self.currency.as_str()
        } else {
            currency
        };
        format!("{} {code}", self.number(amount))
    }
}

impl DateFormatter for CliFormatters {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }
}
