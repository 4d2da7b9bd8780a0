//! # Version-Control Metadata Cleanup
//!
//! Removes `.git` directories under each project path after checkout, so the
//! aggregated tree carries no version-control metadata.
//!
//! This is the only component of the pipeline with explicit failure
//! recovery. Deletion is a two-tier strategy:
//!
//! 1. Force every entry under the metadata directory writable, then attempt
//!    a bulk `remove_dir_all`.
//! 2. On a permission error, fall back to removing files one by one. Each
//!    per-file failure is logged and collected rather than raised, and the
//!    bulk removal is retried afterwards.
//!
//! Callers receive the collected per-file failures as a list; only a failing
//! final retry aborts the run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

use crate::defaults;
use crate::error::Result;
use crate::filesystem;

/// One file that could not be removed during the per-file fallback.
#[derive(Debug)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Recursively locate and delete version-control metadata directories under
/// `base_path`.
///
/// A missing `base_path` is benign: it is logged and yields no failures.
pub fn delete_vcs_metadata(base_path: &Path) -> Result<Vec<CleanupFailure>> {
    let mut failures = Vec::new();

    if !base_path.exists() {
        info!(
            "skipping metadata cleanup, {} does not exist",
            base_path.display()
        );
        return Ok(failures);
    }

    for metadata_dir in find_metadata_dirs(base_path) {
        info!("deleting {}", metadata_dir.display());
        filesystem::make_tree_writable(&metadata_dir);

        match fs::remove_dir_all(&metadata_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                warn!(
                    "permission denied removing {}, retrying file by file: {}",
                    metadata_dir.display(),
                    e
                );
                remove_files_individually(&metadata_dir, &mut failures);
                fs::remove_dir_all(&metadata_dir)?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(failures)
}

/// Collect every directory named `.git` under `base`, without descending
/// into the ones found.
fn find_metadata_dirs(base: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let mut walker = WalkDir::new(base).into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("cannot inspect workspace entry: {}", e);
                continue;
            }
        };
        if entry.file_type().is_dir() && entry.file_name() == defaults::VCS_METADATA_DIR {
            dirs.push(entry.path().to_path_buf());
            walker.skip_current_dir();
        }
    }

    dirs
}

/// Best-effort per-file removal; failures are logged and collected.
fn remove_files_individually(dir: &Path, failures: &mut Vec<CleanupFailure>) {
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        if let Err(e) = fs::remove_file(entry.path()) {
            warn!("failed to delete {}: {}", entry.path().display(), e);
            failures.push(CleanupFailure {
                path: entry.path().to_path_buf(),
                error: e,
            });
        }
    }
}
