use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Environment variable that overrides [`Config::api_base_url`].
pub const API_URL_ENV: &str = "SPENDBOARD_API_URL";

/// Stores user-configurable dashboard preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    /// Page size requested for the bulk expense and limit fetches.
    #[serde(default = "Config::default_page_size")]
    pub page_size: u32,
    #[serde(default = "Config::default_top_categories")]
    pub top_categories: usize,
    #[serde(default = "Config::default_top_payment_methods")]
    pub top_payment_methods: usize,
    #[serde(default = "Config::default_top_items")]
    pub top_items: usize,
    #[serde(default = "Config::default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::default_api_base_url(),
            currency: Self::default_currency(),
            locale: Self::default_locale(),
            page_size: Self::default_page_size(),
            top_categories: Self::default_top_categories(),
            top_payment_methods: Self::default_top_payment_methods(),
            top_items: Self::default_top_items(),
            request_timeout_secs: Self::default_request_timeout_secs(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_api_base_url() -> String {
        "http://localhost:8000/api".into()
    }

    pub fn default_currency() -> String {
        "BRL".into()
    }

    pub fn default_locale() -> String {
        "pt-BR".into()
    }

    pub fn default_page_size() -> u32 {
        1000
    }

    pub fn default_top_categories() -> usize {
        5
    }

    pub fn default_top_payment_methods() -> usize {
        5
    }

    pub fn default_top_items() -> usize {
        10
    }

    pub fn default_request_timeout_secs() -> u64 {
        30
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Applies `SPENDBOARD_API_URL` when it is set and non-blank.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                self.api_base_url = trimmed.to_string();
            }
        }
    }

    /// Checks the values a fetch depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "api_base_url",
                message: format!("`{url}` is not an http(s) URL"),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "page_size",
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"api_base_url":"https://finance.example/api"}"#).unwrap();
        assert_eq!(config.api_base_url, "https://finance.example/api");
        assert_eq!(config.page_size, 1000);
        assert_eq!(config.top_items, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_http_urls_and_zero_page_size() {
        let mut config = Config {
            api_base_url: "ftp://nowhere".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        config.api_base_url = Config::default_api_base_url();
        config.page_size = 0;
        assert!(config.validate().is_err());
    }
}
