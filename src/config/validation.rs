use super::{BackupConfig, Config, ConfigError, Result};

pub fn validate_config(config: &Config) -> Result<()> {
    validate_backup_config(&config.backup)?;
    Ok(())
}

pub fn validate_backup_config(backup: &BackupConfig) -> Result<()> {
    if backup.suffix.is_empty() {
        return Err(ConfigError::Validation(
            "Backup suffix cannot be empty; the backup root would be the source itself".to_string(),
        ));
    }

    if backup.suffix.contains('/') || backup.suffix.contains('\\') {
        return Err(ConfigError::Validation(format!(
            "Backup suffix '{}' must not contain path separators",
            backup.suffix
        )));
    }

    Ok(())
}
