//! # Workspace Synchronization
//!
//! Brings one project's local workspace to its target state: clone or
//! update, sparse-checkout configuration, revision checkout, and sparse
//! flattening.
//!
//! ## Design
//!
//! Version-control actions go through the [`VcsOps`] trait so that the
//! orchestration logic can be tested against a mock implementation without
//! running real git commands or touching the network. The production
//! implementation, [`SystemGit`], wraps the actual `git` command via
//! [`crate::git`].

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::error::Result;
use crate::filesystem;
use crate::manifest::Project;

/// Version-control operations used by project synchronization.
///
/// Implemented by [`SystemGit`] in production and by mocks in tests.
pub trait VcsOps {
    /// Clone a repository without checking out a working tree.
    fn clone_no_checkout(&self, url: &str, path: &Path) -> Result<()>;

    /// Fetch updates for an already-cloned workspace.
    fn fetch(&self, path: &Path) -> Result<()>;

    /// Enable sparse-checkout mode restricted to the given sub-paths.
    fn enable_sparse_checkout(&self, path: &Path, sparse_paths: &[String]) -> Result<()>;

    /// Check out a revision in a workspace.
    fn checkout(&self, path: &Path, revision: &str) -> Result<()>;
}

/// The default [`VcsOps`] implementation, backed by the system `git` command.
pub struct SystemGit;

impl VcsOps for SystemGit {
    fn clone_no_checkout(&self, url: &str, path: &Path) -> Result<()> {
        crate::git::clone_no_checkout(url, path)
    }

    fn fetch(&self, path: &Path) -> Result<()> {
        crate::git::fetch(path)
    }

    fn enable_sparse_checkout(&self, path: &Path, sparse_paths: &[String]) -> Result<()> {
        crate::git::enable_sparse_checkout(path, sparse_paths)
    }

    fn checkout(&self, path: &Path, revision: &str) -> Result<()> {
        crate::git::checkout(path, revision)
    }
}

/// Synchronize one project's workspace to its target revision.
///
/// - Absent path: no-checkout clone from `url`. Present path: fetch updates.
/// - With sparse paths: sparse-checkout configuration is applied before the
///   revision checkout, and each sparse sub-path is flattened afterwards.
///
/// Any failing version-control operation aborts the run.
pub fn sync_project(ops: &dyn VcsOps, project: &Project, url: &str) -> Result<()> {
    if !project.path.exists() {
        info!("cloning {} into {}", project.name, project.path.display());
        ops.clone_no_checkout(url, &project.path)?;
    } else {
        info!(
            "{} already exists at {}, fetching updates",
            project.name,
            project.path.display()
        );
        ops.fetch(&project.path)?;
    }

    if !project.sparse_paths.is_empty() {
        ops.enable_sparse_checkout(&project.path, &project.sparse_paths)?;
        info!(
            "sparse-checkout paths configured for {}: {:?}",
            project.name, project.sparse_paths
        );
    }

    info!("checking out {} for {}", project.revision, project.name);
    ops.checkout(&project.path, &project.revision)?;

    for sparse_path in &project.sparse_paths {
        flatten_sparse_dir(&project.path, sparse_path)?;
    }

    Ok(())
}

/// Move every entry directly under `root/<sparse_path>` up into `root`, then
/// remove the now-redundant wrapping directory chain.
///
/// For a sparse path `a/b` this removes `root/a` entirely: under sparse
/// checkout the intermediate directory holds nothing but the flattened
/// sub-path.
pub fn flatten_sparse_dir(root: &Path, sparse_path: &str) -> Result<()> {
    let trimmed = sparse_path.trim_end_matches('/');
    if trimmed.is_empty() {
        warn!("ignoring empty sparse path for {}", root.display());
        return Ok(());
    }

    let source = root.join(trimmed);
    if !source.is_dir() {
        warn!(
            "sparse path {} not present under {}, nothing to flatten",
            trimmed,
            root.display()
        );
        return Ok(());
    }

    for entry in fs::read_dir(&source)? {
        let entry = entry?;
        let destination = root.join(entry.file_name());
        info!(
            "moving {} to {}",
            entry.path().display(),
            destination.display()
        );
        filesystem::move_entry(&entry.path(), &destination)?;
    }

    let top_component = trimmed.split('/').next().unwrap_or(trimmed);
    let wrapper = root.join(top_component);
    info!("removing folder {}", wrapper.display());
    fs::remove_dir_all(&wrapper)?;

    Ok(())
}
