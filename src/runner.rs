//! Installer subprocess runner
//!
//! The dispatcher never talks to `std::process` directly; it goes through the
//! [`InstallerRunner`] trait so dispatch logic can be tested against fakes.
//! [`NpmRunner`] is the production implementation: it spawns the installer
//! with the target directory as working directory, drains its output on
//! reader threads, and enforces a hard per-invocation deadline.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

use crate::dispatch::InstallOptions;

/// How often an in-flight child is re-checked for cancellation
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Raw result of one installer invocation
#[derive(Debug)]
pub enum RunOutput {
    /// Installer ran to completion (successfully or not)
    Exited {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
    /// Installer exceeded the allotted time and was killed
    TimedOut,
    /// Installer process could not be started
    SpawnFailed { reason: String },
    /// Run was cancelled while the installer was in flight
    Interrupted,
}

/// Narrow seam between the dispatcher and the operating system
pub trait InstallerRunner: Sync {
    /// Run the installer in `dir` with the given options, blocking until it
    /// exits, times out, or the run is cancelled
    fn run(&self, dir: &Path, options: &InstallOptions) -> RunOutput;
}

/// Spawns the real installer binary (`npm` unless overridden)
pub struct NpmRunner {
    program: String,
    timeout: Duration,
    cancel: Arc<AtomicBool>,
}

impl NpmRunner {
    pub fn new(program: String, timeout: Duration, cancel: Arc<AtomicBool>) -> Self {
        Self {
            program,
            timeout,
            cancel,
        }
    }
}

/// Drain a child pipe to a string on a background thread, so a chatty
/// installer cannot fill the pipe buffer and wedge against our wait
fn drain_pipe<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    })
}

impl InstallerRunner for NpmRunner {
    fn run(&self, dir: &Path, options: &InstallOptions) -> RunOutput {
        let mut cmd = Command::new(&self.program);
        cmd.arg("install");
        if options.production {
            cmd.arg("--production");
        }
        cmd.current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                return RunOutput::SpawnFailed {
                    reason: err.to_string(),
                };
            }
        };

        let stdout = drain_pipe(child.stdout.take());
        let stderr = drain_pipe(child.stderr.take());

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if self.cancel.load(Ordering::SeqCst) {
                let _ = child.kill();
                let _ = child.wait();
                return RunOutput::Interrupted;
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                let _ = child.kill();
                let _ = child.wait();
                return RunOutput::TimedOut;
            }

            match child.wait_timeout(remaining.min(POLL_INTERVAL)) {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(err) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return RunOutput::SpawnFailed {
                        reason: format!("Failed to wait for installer: {err}"),
                    };
                }
            }
        };

        RunOutput::Exited {
            code: status.code(),
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        }
    }
}
