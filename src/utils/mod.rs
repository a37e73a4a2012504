pub mod error;
pub mod logging;
pub mod path;

pub use error::{ArchiverError, Result};
pub use path::{backup_root_for, safe_resolve_path};
