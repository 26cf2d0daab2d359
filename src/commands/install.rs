//! Install command implementation
//!
//! Orchestrates one run end to end:
//! 1. Canonicalize and validate the root directory
//! 2. Discover install targets (pruning node_modules subtrees)
//! 3. Install the interrupt handler
//! 4. Dispatch the installer across targets
//! 5. Render the run report and map overall failure to a non-zero exit

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::cli::InstallArgs;
use crate::discovery;
use crate::dispatch::{Dispatcher, InstallOptions, RunReport};
use crate::error::{Result, RnpmError};
use crate::progress::ProgressDisplay;
use crate::runner::NpmRunner;
use crate::ui;

fn print_json(report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(|e| {
        RnpmError::ReportSerializeFailed {
            reason: e.to_string(),
        }
    })?;
    println!("{json}");
    Ok(())
}

/// Run install command
pub fn run(args: InstallArgs) -> Result<()> {
    let root = dunce::canonicalize(&args.root).map_err(|_| RnpmError::RootNotFound {
        path: args.root.display().to_string(),
    })?;

    let found = discovery::discover(&root)?;
    ui::render_skipped(&found);

    if found.targets.is_empty() {
        if args.json {
            return print_json(&RunReport::from_outcomes(Vec::new()));
        }
        println!("No package manifests found under {}", root.display());
        return Ok(());
    }

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        ctrlc::set_handler(move || cancel.store(true, Ordering::SeqCst)).map_err(|e| {
            RnpmError::IoError {
                message: format!("Failed to install interrupt handler: {e}"),
            }
        })?;
    }

    let runner = NpmRunner::new(
        args.installer.clone(),
        Duration::from_secs(args.timeout),
        Arc::clone(&cancel),
    );
    let dispatcher = Dispatcher::new(
        runner,
        InstallOptions {
            production: args.production,
        },
        args.concurrency,
        cancel,
    );

    let progress = (!args.json).then(|| ProgressDisplay::new(found.targets.len() as u64));
    let report = dispatcher.run(&found.targets, progress.as_ref());
    if let Some(progress) = progress {
        progress.finish();
    }

    if args.json {
        print_json(&report)?;
    } else {
        ui::render_report(&report);
    }

    if report.success {
        Ok(())
    } else if report.was_cancelled() {
        Err(RnpmError::Interrupted {
            completed: report.completed_count(),
            total: report.outcomes.len(),
        })
    } else {
        Err(RnpmError::TargetsFailed {
            failed: report.failed_count(),
            total: report.outcomes.len(),
        })
    }
}
