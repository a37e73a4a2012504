use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod defaults;
pub mod manager;
pub mod validation;

pub use manager::ConfigManager;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub backup: BackupConfig,
    pub safety: SafetyConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BackupConfig {
    /// Appended to the source root to name the backup root.
    pub suffix: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SafetyConfig {
    /// Make each source file fully permissive right before deleting it.
    ///
    /// This widens permissions on the original moments before it disappears.
    /// It is what lets read-only files be relocated at all.
    pub relax_permissions_before_delete: bool,
    /// Ask for confirmation before a real (non dry-run) relocation.
    pub confirm_before_move: bool,
}

impl Default for Config {
    fn default() -> Self {
        defaults::default_config()
    }
}

impl Default for BackupConfig {
    fn default() -> Self {
        defaults::default_backup_config()
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        defaults::default_safety_config()
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for crate::utils::ArchiverError {
    fn from(error: ConfigError) -> Self {
        crate::utils::ArchiverError::config_error(error.to_string())
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    pub fn backup_suffix(&self) -> &str {
        &self.backup.suffix
    }

    pub fn should_relax_permissions(&self) -> bool {
        self.safety.relax_permissions_before_delete
    }

    pub fn should_confirm(&self) -> bool {
        self.safety.confirm_before_move
    }
}
