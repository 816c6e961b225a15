use std::result::Result as StdResult;

use spendboard_config::ConfigError;
use spendboard_core::CoreError;
use thiserror::Error;

/// Unified error type for the client, controller and configuration layers.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Record Store returned {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },
    #[error("Unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Unknown category `{0}`")]
    UnknownCategory(String),
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = StdResult<T, DashboardError>;

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Storage(err.to_string())
    }
}

impl From<CoreError> for DashboardError {
    fn from(err: CoreError) -> Self {
        DashboardError::InvalidInput(err.to_string())
    }
}

impl From<ConfigError> for DashboardError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => DashboardError::Storage(io.to_string()),
            other => DashboardError::Config(other.to_string()),
        }
    }
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Dashboard(err.into())
    }
}
