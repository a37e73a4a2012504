pub mod relocator;
pub mod request;
pub mod run;
pub mod sink;
pub mod walker;
pub mod worker;

pub use relocator::{Outcome, RelocateOptions};
pub use request::BackupRequest;
pub use run::{BackupRun, RunReport, RunState};
pub use sink::{LogSink, NullSink, ProgressSink};
pub use walker::{FileTask, Scan};
pub use worker::{BackupHandle, BackupWorker, CancelToken};
