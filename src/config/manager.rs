use super::defaults::{default_config, get_config_file_path};
use super::{Config, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only access to the configuration file. Nothing here ever writes it.
pub struct ConfigManager;

impl ConfigManager {
    pub fn get_config_path() -> PathBuf {
        get_config_file_path()
    }

    /// Load from an explicit path, or from the default location. A missing
    /// file yields the defaults.
    pub fn load_with_path(config_path: Option<&Path>) -> Result<Config> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => get_config_file_path(),
        };

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            let config = default_config();
            config.validate()?;
            Ok(config)
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
