use crate::cli::parser::RunArgs;
use crate::config::ConfigManager;
use crate::core::sink::percent;
use crate::core::{BackupRequest, BackupWorker, RelocateOptions, RunReport, RunState};
use crate::utils::{ArchiverError, Result};
use dialoguer::Confirm;
use std::io::Write;
use std::sync::mpsc;

/// Messages from the worker thread; the main thread owns the terminal.
enum WorkerEvent {
    Progress { processed: usize, total: usize },
    Log(String),
}

pub fn execute(args: RunArgs) -> Result<()> {
    let config = ConfigManager::load_with_path(args.config.as_deref())?;
    let request =
        BackupRequest::from_inputs(&args.source, &args.cutoff_year, args.dry_run, &config)?;

    if args.needs_confirmation(config.should_confirm()) && !confirm_relocation(&request)? {
        println!("Backup cancelled");
        return Ok(());
    }

    if !args.json {
        println!("Starting backup...");
    }

    let show_progress = !args.json && atty::is(atty::Stream::Stderr);
    let (report, transcript) = run_in_background(
        request,
        RelocateOptions::from_config(&config),
        show_progress,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", transcript.unwrap_or_else(|| report.log_block()));
    }

    if report.state == RunState::Cancelled {
        eprintln!("Backup interrupted; remaining files were left in place.");
    }

    Ok(())
}

fn run_in_background(
    request: BackupRequest,
    options: RelocateOptions,
    show_progress: bool,
) -> Result<(RunReport, Option<String>)> {
    let (tx, rx) = mpsc::channel();
    let progress_tx = tx.clone();

    let handle = BackupWorker::start(
        request,
        options,
        move |block: &str| {
            let _ = tx.send(WorkerEvent::Log(block.to_string()));
        },
        move |processed: usize, total: usize| {
            let _ = progress_tx.send(WorkerEvent::Progress { processed, total });
        },
    )?;

    let token = handle.cancel_token();
    if let Err(e) = ctrlc::set_handler(move || token.cancel()) {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
    }

    // Ends once the worker drops both sinks.
    let mut transcript = None;
    for event in rx {
        match event {
            WorkerEvent::Progress { processed, total } => {
                if show_progress {
                    eprint!("\r{}", format_progress(processed, total));
                    let _ = std::io::stderr().flush();
                }
            }
            WorkerEvent::Log(block) => transcript = Some(block),
        }
    }
    if show_progress {
        eprintln!();
    }

    let report = handle.wait()?;
    Ok((report, transcript))
}

fn format_progress(processed: usize, total: usize) -> String {
    format!(
        "Progress: {:>3}% ({}/{})",
        percent(processed, total),
        processed,
        total
    )
}

fn is_non_interactive() -> bool {
    std::env::var("ARCHIVIST_NON_INTERACTIVE").is_ok()
        || std::env::var("CI").is_ok()
        || !atty::is(atty::Stream::Stdin)
}

fn confirm_relocation(request: &BackupRequest) -> Result<bool> {
    if is_non_interactive() {
        return Err(ArchiverError::invalid_args(
            "Cannot confirm relocation in non-interactive mode. Use --yes to skip the confirmation prompt or --dry-run to preview.",
        ));
    }

    Confirm::new()
        .with_prompt(format!(
            "Move files last modified before {} from {} to {}?",
            request.cutoff_year,
            request.source_root.display(),
            request.backup_root.display()
        ))
        .default(false)
        .interact()
        .map_err(|e| ArchiverError::invalid_args(format!("Failed to read confirmation: {e}")))
}
