use std::path::PathBuf;

pub use spendboard_config::model::API_URL_ENV;
pub use spendboard_config::{Config, ConfigError, ConfigManager};

use crate::errors::Result;

pub fn default_manager() -> std::result::Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(ConfigManager::default_base_dir())
}

pub fn manager_with_base(base: PathBuf) -> std::result::Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(base)
}

/// Loads the stored config, applies environment overrides and validates it.
pub fn load_effective(manager: &ConfigManager) -> Result<Config> {
    let mut config = manager.load()?;
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}
