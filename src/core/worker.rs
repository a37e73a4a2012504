use crate::core::relocator::RelocateOptions;
use crate::core::request::BackupRequest;
use crate::core::run::{BackupRun, RunReport};
use crate::core::sink::{LogSink, ProgressSink};
use crate::utils::{ArchiverError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

const WORKER_THREAD_NAME: &str = "archivist-worker";

/// Cooperative cancellation flag, checked between files.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Runs a whole backup on one background thread so the caller stays
/// responsive. Files are still processed strictly one after another.
pub struct BackupWorker;

impl BackupWorker {
    pub fn start<L, P>(
        request: BackupRequest,
        options: RelocateOptions,
        log_sink: L,
        progress_sink: P,
    ) -> Result<BackupHandle>
    where
        L: LogSink + Send + 'static,
        P: ProgressSink + Send + 'static,
    {
        Self::start_with_token(request, options, log_sink, progress_sink, CancelToken::new())
    }

    pub fn start_with_token<L, P>(
        request: BackupRequest,
        options: RelocateOptions,
        mut log_sink: L,
        mut progress_sink: P,
        cancel: CancelToken,
    ) -> Result<BackupHandle>
    where
        L: LogSink + Send + 'static,
        P: ProgressSink + Send + 'static,
    {
        let token = cancel.clone();
        let join = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let mut run = BackupRun::new(request);
                run.execute(options, &mut log_sink, &mut progress_sink, &token)
            })
            .map_err(|e| ArchiverError::worker(format!("failed to spawn worker thread: {e}")))?;

        Ok(BackupHandle { join, cancel })
    }
}

/// Handle to a running backup.
pub struct BackupHandle {
    join: JoinHandle<Result<RunReport>>,
    cancel: CancelToken,
}

impl BackupHandle {
    /// Ask the worker to stop before the next file.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Block until the worker finishes and hand back its result.
    pub fn wait(self) -> Result<RunReport> {
        self.join
            .join()
            .map_err(|_| ArchiverError::worker("worker thread panicked"))?
    }
}
