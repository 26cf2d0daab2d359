//! Target discovery
//!
//! Walks a directory tree and records every directory that directly contains
//! a package manifest. Subtrees under the dependency-output directory name
//! (`node_modules`) are pruned entirely, so manifests belonging to
//! already-installed sub-dependencies are never selected, and large resolved
//! trees are never walked.
//!
//! The walk is depth-first pre-order with siblings in file-name order, which
//! makes the target list deterministic and reproducible for an unmodified
//! tree. Descent continues below matched targets: a monorepo's nested
//! packages become additional independent targets.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, RnpmError};

/// Manifest file whose presence marks a directory as an install target
pub const MANIFEST_FILE: &str = "package.json";

/// Directory name the installer materializes dependencies into
pub const DEPENDENCY_DIR: &str = "node_modules";

/// A directory selected for an install invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Absolute path of the directory containing the manifest
    pub path: PathBuf,
    /// Depth below the walk root (root itself is 0)
    pub depth: usize,
}

/// A directory skipped mid-walk because it could not be read
#[derive(Debug, Clone)]
pub struct SkippedDir {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of one discovery pass: ordered targets plus any unreadable
/// subdirectories the walk stepped over
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub targets: Vec<Target>,
    pub skipped: Vec<SkippedDir>,
}

/// Check if a directory directly contains a package manifest
pub fn contains_manifest(dir: &Path) -> bool {
    dir.join(MANIFEST_FILE).is_file()
}

/// Discover all install targets under `root`
///
/// A missing or unreadable root is fatal. Unreadable subdirectories are
/// recorded in the report's skipped list and the walk continues.
pub fn discover(root: &Path) -> Result<DiscoveryReport> {
    if !root.exists() {
        return Err(RnpmError::RootNotFound {
            path: root.display().to_string(),
        });
    }
    if !root.is_dir() {
        return Err(RnpmError::RootNotADirectory {
            path: root.display().to_string(),
        });
    }

    let mut report = DiscoveryReport::default();

    // The root is always an install candidate even if it is itself named
    // node_modules; pruning applies to descendants only.
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != DEPENDENCY_DIR);

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_dir() && contains_manifest(entry.path()) {
                    report.targets.push(Target {
                        path: entry.path().to_path_buf(),
                        depth: entry.depth(),
                    });
                }
            }
            Err(err) => {
                if err.depth() == 0 {
                    return Err(RnpmError::RootUnreadable {
                        path: root.display().to_string(),
                        reason: err.to_string(),
                    });
                }
                let path = err
                    .path()
                    .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
                report.skipped.push(SkippedDir {
                    path,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(report)
}
