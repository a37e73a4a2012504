use super::{BackupConfig, Config, SafetyConfig};
use std::path::PathBuf;

pub const DEFAULT_BACKUP_SUFFIX: &str = "_backup";
pub const CONFIG_ENV_VAR: &str = "ARCHIVIST_CONFIG";

pub fn default_config() -> Config {
    Config {
        backup: default_backup_config(),
        safety: default_safety_config(),
    }
}

pub fn default_backup_config() -> BackupConfig {
    BackupConfig {
        suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
    }
}

pub fn default_safety_config() -> SafetyConfig {
    SafetyConfig {
        relax_permissions_before_delete: true,
        confirm_before_move: true,
    }
}

pub fn get_default_config_dir() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "archivist") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config").join("archivist")
    }
}

/// Location of the config file, honouring `ARCHIVIST_CONFIG` when set.
pub fn get_config_file_path() -> PathBuf {
    config_file_path_from(std::env::var(CONFIG_ENV_VAR).ok())
}

fn config_file_path_from(env_value: Option<String>) -> PathBuf {
    match env_value.filter(|v| !v.trim().is_empty()) {
        Some(path) => PathBuf::from(path),
        None => get_default_config_dir().join("config.json"),
    }
}
