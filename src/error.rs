//! Error types and handling for rnpm
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Only run-fatal conditions live here. Per-target installer failures are
//! result values (`dispatch::OutcomeStatus`), not errors, so the dispatcher
//! can aggregate them without unwinding past the remaining targets.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for rnpm operations
#[derive(Error, Diagnostic, Debug)]
pub enum RnpmError {
    // File system errors
    #[error("Root directory not found: {path}")]
    #[diagnostic(
        code(rnpm::fs::root_not_found),
        help("Check the path passed via --root / -C, or run from the tree you want to install")
    )]
    RootNotFound { path: String },

    #[error("Not a directory: {path}")]
    #[diagnostic(
        code(rnpm::fs::root_not_a_directory),
        help("The install root must be a directory, not a file")
    )]
    RootNotADirectory { path: String },

    #[error("Failed to read root directory: {path}: {reason}")]
    #[diagnostic(code(rnpm::fs::root_unreadable))]
    RootUnreadable { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(rnpm::fs::io_error))]
    IoError { message: String },

    // Dispatch errors
    #[error("Installation failed for {failed} of {total} targets")]
    #[diagnostic(
        code(rnpm::dispatch::targets_failed),
        help("Per-target output is listed above; rerun after fixing the failing packages")
    )]
    TargetsFailed { failed: usize, total: usize },

    #[error("Interrupted after {completed} of {total} targets")]
    #[diagnostic(code(rnpm::dispatch::interrupted))]
    Interrupted { completed: usize, total: usize },

    #[error("Failed to serialize run report: {reason}")]
    #[diagnostic(code(rnpm::report::serialize_failed))]
    ReportSerializeFailed { reason: String },
}

impl From<std::io::Error> for RnpmError {
    fn from(err: std::io::Error) -> Self {
        RnpmError::IoError {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = miette::Result<T, RnpmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_path() {
        let err = RnpmError::RootNotFound {
            path: "/no/such/dir".to_string(),
        };
        assert!(err.to_string().contains("/no/such/dir"));
    }

    #[test]
    fn test_targets_failed_counts() {
        let err = RnpmError::TargetsFailed {
            failed: 2,
            total: 5,
        };
        assert_eq!(err.to_string(), "Installation failed for 2 of 5 targets");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RnpmError = io.into();
        assert!(matches!(err, RnpmError::IoError { .. }));
    }
}
