use crate::cli::parser::{ConfigArgs, ConfigCommands};
use crate::config::ConfigManager;
use crate::utils::{ArchiverError, Result};
use std::path::Path;

pub fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        Some(ConfigCommands::Show { config }) => execute_show(config.as_deref()),
        Some(ConfigCommands::Path) => execute_path(),
        None => execute_show(None),
    }
}

fn execute_show(config_path: Option<&Path>) -> Result<()> {
    println!("{}", render_config(config_path)?);
    Ok(())
}

fn render_config(config_path: Option<&Path>) -> Result<String> {
    let config = ConfigManager::load_with_path(config_path).map_err(|e| {
        ArchiverError::config_error(format!("Failed to load configuration: {e}"))
    })?;
    Ok(serde_json::to_string_pretty(&config)?)
}

fn execute_path() -> Result<()> {
    println!("{}", ConfigManager::get_config_path().display());
    Ok(())
}
