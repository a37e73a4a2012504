pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use core::{BackupRequest, BackupRun, BackupWorker, RunReport, RunState};
pub use utils::{ArchiverError, Result};
