//! # Sync Pipeline
//!
//! Sequential orchestration of a full sync run:
//!
//! 1. **Parse** — read the manifest and run the two-pass placeholder parse.
//! 2. **Synchronize** — for each project in manifest order, resolve its
//!    remote, derive the clone URL, and bring the workspace to the target
//!    revision (including sparse flattening). A project whose remote is not
//!    declared is skipped with a diagnostic; every other project is still
//!    processed.
//! 3. **Cleanup** — delete version-control metadata under every existing
//!    project path.
//! 4. **Reorganize** — consolidate everything into the sequences layout.
//!
//! Execution is fully sequential and single-threaded; each external
//! version-control command blocks until completion, and any non-zero exit
//! aborts the run.

use std::path::Path;

use log::{info, warn};

use crate::cleanup::{self, CleanupFailure};
use crate::error::Result;
use crate::manifest::{self, Manifest};
use crate::reorganize;
use crate::workspace::{self, VcsOps};

/// Outcome of a sync run, summarized for the command layer.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Projects synchronized, in manifest order.
    pub synced: Vec<String>,
    /// Projects skipped because their remote reference did not resolve.
    pub skipped: Vec<String>,
    /// Files that could not be removed during metadata cleanup.
    pub cleanup_failures: Vec<CleanupFailure>,
}

/// Run the full pipeline for the manifest at `manifest_path`.
///
/// The manifest location is an explicit argument rather than ambient state;
/// callers decide where configuration comes from.
pub fn run(manifest_path: &Path, ops: &dyn VcsOps) -> Result<SyncReport> {
    let manifest = manifest::from_file(manifest_path)?;
    run_with_manifest(&manifest, ops)
}

/// Run the pipeline for an already-parsed manifest.
pub fn run_with_manifest(manifest: &Manifest, ops: &dyn VcsOps) -> Result<SyncReport> {
    let mut report = SyncReport::default();

    for project in &manifest.projects {
        let Some(remote) = manifest.remote(&project.remote) else {
            warn!(
                "remote {} for project {} not found in manifest, skipping",
                project.remote, project.name
            );
            report.skipped.push(project.name.clone());
            continue;
        };

        let url = remote.clone_url(&project.name);
        workspace::sync_project(ops, project, &url)?;
        report.synced.push(project.name.clone());
    }

    info!("cleaning up version-control metadata");
    for project in &manifest.projects {
        report
            .cleanup_failures
            .extend(cleanup::delete_vcs_metadata(&project.path)?);
    }

    reorganize::reorganize(manifest)?;

    Ok(report)
}
