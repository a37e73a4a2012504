use crate::core::relocator::{relocate, Outcome, RelocateOptions};
use crate::core::request::BackupRequest;
use crate::core::sink::{LogSink, ProgressSink};
use crate::core::walker::{collect_tasks, FileTask};
use crate::core::worker::CancelToken;
use crate::utils::{ArchiverError, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Running,
    Complete,
    Failed,
    Cancelled,
}

/// Mutable bookkeeping for one pass over a source tree.
#[derive(Debug)]
pub struct BackupRun {
    request: BackupRequest,
    state: RunState,
    total: usize,
    examined: usize,
    moved: usize,
    failed: usize,
    log: Vec<String>,
}

/// Final, serializable account of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub source_root: PathBuf,
    pub backup_root: PathBuf,
    pub cutoff_year: i32,
    pub dry_run: bool,
    pub state: RunState,
    pub total: usize,
    pub examined: usize,
    /// Files moved, or in a dry run, files that would be moved.
    pub moved: usize,
    pub failed: usize,
    pub log: Vec<String>,
    pub summary: String,
}

impl RunReport {
    /// The transcript handed to the log sink: per-file lines, a blank line,
    /// then the summary.
    pub fn log_block(&self) -> String {
        let mut lines = self.log.clone();
        lines.push(String::new());
        lines.push(self.summary.clone());
        lines.join("\n")
    }
}

impl BackupRun {
    pub fn new(request: BackupRequest) -> Self {
        Self {
            request,
            state: RunState::Idle,
            total: 0,
            examined: 0,
            moved: 0,
            failed: 0,
            log: Vec::new(),
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Walk, relocate, report. Only a failure to enumerate the source root
    /// (or to create the backup root) ends the run with an error; unreadable
    /// subtrees and per-file failures are logged and the run carries on.
    pub fn execute(
        &mut self,
        options: RelocateOptions,
        log_sink: &mut dyn LogSink,
        progress_sink: &mut dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<RunReport> {
        if self.state != RunState::Idle {
            return Err(ArchiverError::worker("a backup run can only be executed once"));
        }
        self.state = RunState::Running;

        tracing::info!(
            source = %self.request.source_root.display(),
            backup = %self.request.backup_root.display(),
            cutoff_year = self.request.cutoff_year,
            dry_run = self.request.dry_run,
            "starting backup"
        );

        let tasks = match self.prepare() {
            Ok(tasks) => tasks,
            Err(e) => {
                self.state = RunState::Failed;
                tracing::error!(error = %e, "backup aborted before processing");
                return Err(e);
            }
        };
        self.total = tasks.len();

        for task in &tasks {
            if cancel.is_cancelled() {
                self.state = RunState::Cancelled;
                break;
            }

            let result = relocate(
                task,
                &self.request.backup_root,
                self.request.cutoff_year,
                self.request.dry_run,
                options,
            );
            self.record(result);
            progress_sink.report(self.examined, self.total);
        }

        if self.state == RunState::Running {
            self.state = RunState::Complete;
        }

        let report = self.report();
        tracing::info!(
            state = ?report.state,
            examined = report.examined,
            moved = report.moved,
            failed = report.failed,
            "backup finished"
        );
        log_sink.deliver(&report.log_block());
        Ok(report)
    }

    fn prepare(&mut self) -> Result<Vec<FileTask>> {
        let scan = collect_tasks(&self.request.source_root)?;
        if !self.request.dry_run {
            fs::create_dir_all(&self.request.backup_root)?;
        }
        for e in scan.skipped {
            self.failed += 1;
            self.log.push(format!("Error: {e}"));
        }
        Ok(scan.tasks)
    }

    fn record(&mut self, result: Result<Outcome>) {
        self.examined += 1;
        match result {
            Ok(outcome) => {
                if outcome.qualified() {
                    self.moved += 1;
                }
                if let Some(line) = outcome.log_line() {
                    self.log.push(line);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "file not relocated");
                self.failed += 1;
                self.log.push(format!("Error: {e}"));
            }
        }
    }

    fn summary(&self) -> String {
        if self.state == RunState::Cancelled {
            return format!(
                "Backup Cancelled: processed {} of {} files.",
                self.examined, self.total
            );
        }

        match (self.moved, self.request.dry_run) {
            (0, _) => format!(
                "Backup Complete: No files older than {} found.",
                self.request.cutoff_year
            ),
            (n, true) => format!("Backup Complete: Would move {n} files."),
            (n, false) => format!("Backup Complete: Moved {n} files."),
        }
    }

    fn report(&self) -> RunReport {
        let mut log = self.log.clone();
        if self.failed > 0 {
            log.push(format!("Failed to move {} files.", self.failed));
        }

        RunReport {
            source_root: self.request.source_root.clone(),
            backup_root: self.request.backup_root.clone(),
            cutoff_year: self.request.cutoff_year,
            dry_run: self.request.dry_run,
            state: self.state,
            total: self.total,
            examined: self.examined,
            moved: self.moved,
            failed: self.failed,
            log,
            summary: self.summary(),
        }
    }
}

/// Run a backup to completion on the calling thread.
pub fn execute(
    request: BackupRequest,
    options: RelocateOptions,
    log_sink: &mut dyn LogSink,
    progress_sink: &mut dyn ProgressSink,
    cancel: &CancelToken,
) -> Result<RunReport> {
    BackupRun::new(request).execute(options, log_sink, progress_sink, cancel)
}
