use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiverError {
    #[error("Input error: {message}")]
    Validation { message: String },

    #[error("Source directory not found: {path}")]
    NotFound { path: String },

    #[error("Failed to enumerate {path}: {source}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Skipped unreadable {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read metadata for {path}: {source}")]
    Stat {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to relocate {path}: {source}")]
    Relocation {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Background worker failed: {message}")]
    Worker { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid arguments: {message}")]
    InvalidArgs { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArchiverError>;

impl ArchiverError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(path: &Path) -> Self {
        Self::NotFound {
            path: display_path(path),
        }
    }

    pub fn walk(path: &Path, source: walkdir::Error) -> Self {
        Self::Walk {
            path: display_path(path),
            source,
        }
    }

    pub fn unreadable(path: &Path, source: walkdir::Error) -> Self {
        Self::Unreadable {
            path: display_path(path),
            source,
        }
    }

    pub fn stat(path: &Path, source: std::io::Error) -> Self {
        Self::Stat {
            path: display_path(path),
            source,
        }
    }

    pub fn relocation(path: &Path, source: std::io::Error) -> Self {
        Self::Relocation {
            path: display_path(path),
            source,
        }
    }

    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker {
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArgs {
            message: message.into(),
        }
    }

    /// Errors that concern a single file and leave the rest of the run intact.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::Unreadable { .. } | Self::Stat { .. } | Self::Relocation { .. }
        )
    }
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
