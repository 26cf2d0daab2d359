//! Install dispatch and run reporting
//!
//! The dispatcher consumes the discovered target list and invokes the
//! installer once per target. It never short-circuits: every target gets an
//! [`InstallOutcome`], failures included, and the final [`RunReport`] is a
//! plain fold over those values. Dispatch is sequential unless a concurrency
//! above one is requested, in which case targets run on a bounded rayon pool;
//! outcomes are reported in discovery order either way.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use serde::Serialize;

use crate::discovery::Target;
use crate::progress::ProgressDisplay;
use crate::runner::{InstallerRunner, RunOutput};

/// Options forwarded verbatim to every installer invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Omit development-only dependencies
    pub production: bool,
}

/// Terminal status of one install attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Installer exited zero
    Success,
    /// Installer ran but exited non-zero
    Failed { code: i32 },
    /// Installer process could not be started
    SpawnFailed { reason: String },
    /// Installer exceeded the per-target timeout and was killed
    TimedOut,
    /// Run was interrupted before or during this target
    Cancelled,
}

impl OutcomeStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeStatus::Success)
    }
}

/// Per-target result: the target path, how the attempt ended, and whatever
/// the installer printed
#[derive(Debug, Clone, Serialize)]
pub struct InstallOutcome {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
}

impl InstallOutcome {
    fn bare(path: PathBuf, status: OutcomeStatus) -> Self {
        Self {
            path,
            status,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Aggregated outcomes of one run, in discovery order
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<InstallOutcome>,
    pub success: bool,
}

impl RunReport {
    pub fn from_outcomes(outcomes: Vec<InstallOutcome>) -> Self {
        let success = outcomes.iter().all(|o| o.status.is_success());
        Self { outcomes, success }
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !o.status.is_success())
            .count()
    }

    pub fn completed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status != OutcomeStatus::Cancelled)
            .count()
    }

    pub fn was_cancelled(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| o.status == OutcomeStatus::Cancelled)
    }
}

/// Runs the installer across targets and aggregates the results
pub struct Dispatcher<R> {
    runner: R,
    options: InstallOptions,
    concurrency: usize,
    cancel: Arc<AtomicBool>,
}

impl<R: InstallerRunner> Dispatcher<R> {
    pub fn new(
        runner: R,
        options: InstallOptions,
        concurrency: usize,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            runner,
            options,
            concurrency: concurrency.max(1),
            cancel,
        }
    }

    /// Attempt installation at every target, in discovery order
    pub fn run(&self, targets: &[Target], progress: Option<&ProgressDisplay>) -> RunReport {
        let outcomes = if self.concurrency > 1 {
            self.run_parallel(targets, progress)
        } else {
            self.run_sequential(targets, progress)
        };
        RunReport::from_outcomes(outcomes)
    }

    fn run_sequential(
        &self,
        targets: &[Target],
        progress: Option<&ProgressDisplay>,
    ) -> Vec<InstallOutcome> {
        targets
            .iter()
            .map(|target| self.install_one(target, progress))
            .collect()
    }

    fn run_parallel(
        &self,
        targets: &[Target],
        progress: Option<&ProgressDisplay>,
    ) -> Vec<InstallOutcome> {
        let threads = self.concurrency.min(num_cpus::get().max(1));
        let pool = match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool,
            // Pool creation can only fail on resource exhaustion; fall back
            // to the sequential path rather than giving up on the run
            Err(_) => return self.run_sequential(targets, progress),
        };

        // Indexed parallel collect keeps outcomes in discovery order no
        // matter which targets finish first
        pool.install(|| {
            targets
                .par_iter()
                .map(|target| self.install_one(target, progress))
                .collect()
        })
    }

    fn install_one(&self, target: &Target, progress: Option<&ProgressDisplay>) -> InstallOutcome {
        if self.cancel.load(Ordering::SeqCst) {
            if let Some(progress) = progress {
                progress.inc();
            }
            return InstallOutcome::bare(target.path.clone(), OutcomeStatus::Cancelled);
        }

        if let Some(progress) = progress {
            progress.start_target(&target.path.display().to_string());
        }

        let outcome = match self.runner.run(&target.path, &self.options) {
            RunOutput::Exited {
                code: Some(0),
                stdout,
                stderr,
            } => InstallOutcome {
                path: target.path.clone(),
                status: OutcomeStatus::Success,
                stdout,
                stderr,
            },
            RunOutput::Exited {
                code,
                stdout,
                stderr,
            } => InstallOutcome {
                path: target.path.clone(),
                // Signal-terminated children carry no exit code
                status: OutcomeStatus::Failed {
                    code: code.unwrap_or(-1),
                },
                stdout,
                stderr,
            },
            RunOutput::TimedOut => {
                InstallOutcome::bare(target.path.clone(), OutcomeStatus::TimedOut)
            }
            RunOutput::SpawnFailed { reason } => {
                InstallOutcome::bare(target.path.clone(), OutcomeStatus::SpawnFailed { reason })
            }
            RunOutput::Interrupted => {
                InstallOutcome::bare(target.path.clone(), OutcomeStatus::Cancelled)
            }
        };

        if let Some(progress) = progress {
            progress.inc();
        }
        outcome
    }
}
