//! spendboard-config
//!
//! Persistent dashboard preferences: where the Record Store lives, how many
//! records to request and how large each ranking is. Owns the Config data
//! structure plus disk persistence and backup helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
