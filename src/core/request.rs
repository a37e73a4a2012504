use crate::config::Config;
use crate::utils::{backup_root_for, safe_resolve_path, ArchiverError, Result};
use chrono::Datelike;
use serde::Serialize;
use std::path::PathBuf;

pub const MIN_CUTOFF_YEAR: i32 = 1900;

const MISSING_SOURCE_MESSAGE: &str = "Please select a source directory.";
const INVALID_YEAR_MESSAGE: &str =
    "Please enter a valid cutoff year (between 1900 and the current year).";

/// Validated parameters for a single backup run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupRequest {
    pub source_root: PathBuf,
    pub backup_root: PathBuf,
    pub cutoff_year: i32,
    pub dry_run: bool,
}

impl BackupRequest {
    /// Validate raw user input against the current local year.
    pub fn from_inputs(
        source: &str,
        cutoff_year: &str,
        dry_run: bool,
        config: &Config,
    ) -> Result<Self> {
        let current_year = chrono::Local::now().year();
        Self::from_inputs_at(source, cutoff_year, dry_run, config, current_year)
    }

    pub fn from_inputs_at(
        source: &str,
        cutoff_year: &str,
        dry_run: bool,
        config: &Config,
        current_year: i32,
    ) -> Result<Self> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ArchiverError::validation(MISSING_SOURCE_MESSAGE));
        }

        let cutoff_year = validate_cutoff_year(cutoff_year, current_year)?;

        // The source is not required to exist yet; the walk reports that.
        let source_root = safe_resolve_path(&PathBuf::from(source));
        let backup_root = backup_root_for(&source_root, config.backup_suffix());

        Ok(Self {
            source_root,
            backup_root,
            cutoff_year,
            dry_run,
        })
    }
}

/// Parse a cutoff year and check it lies in `[1900, current_year]`.
pub fn validate_cutoff_year(input: &str, current_year: i32) -> Result<i32> {
    let year: i32 = input
        .trim()
        .parse()
        .map_err(|_| ArchiverError::validation(INVALID_YEAR_MESSAGE))?;

    if (MIN_CUTOFF_YEAR..=current_year).contains(&year) {
        Ok(year)
    } else {
        Err(ArchiverError::validation(INVALID_YEAR_MESSAGE))
    }
}
