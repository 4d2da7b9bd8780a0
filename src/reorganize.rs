//! # Workspace Reorganization
//!
//! The final pipeline step: consolidates every synchronized project into a
//! shared `sequences` directory and dissolves the per-project layout.
//!
//! - The sequences directory is the sibling named `sequences` next to the
//!   first project's path in manifest order.
//! - Files from every project are moved flat into it, discarding internal
//!   subdirectory structure. Colliding filenames overwrite; the last project
//!   in manifest order wins, and each overwrite is logged.
//! - A project literally named `configurations` is special-cased: its direct
//!   child files are relocated to the parent of the sequences directory.
//! - A `sequence_config.json` found beside the sequences directory is moved
//!   into it as the final step.
//!
//! Project paths listed in the manifest but absent on disk are skipped with
//! a diagnostic.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

use crate::defaults;
use crate::error::Result;
use crate::filesystem;
use crate::manifest::Manifest;

/// Reorganize all project workspaces into the sequences layout.
pub fn reorganize(manifest: &Manifest) -> Result<()> {
    let Some(first) = manifest.projects.first() else {
        warn!("manifest declares no projects, nothing to reorganize");
        return Ok(());
    };

    let parent = first
        .path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let sequences_dir = parent.join(defaults::SEQUENCES_DIR_NAME);
    fs::create_dir_all(&sequences_dir)?;

    for project in &manifest.projects {
        if !project.path.exists() {
            warn!(
                "project path {} does not exist, skipping reorganization",
                project.path.display()
            );
            continue;
        }

        if project.name == defaults::CONFIGURATIONS_PROJECT {
            relocate_configurations(&project.path, &parent)?;
        } else {
            consolidate_project(&project.path, &sequences_dir)?;
        }
    }

    let stray_config = parent.join(defaults::SEQUENCE_CONFIG_FILE);
    if stray_config.is_file() {
        info!(
            "moving {} into {}",
            stray_config.display(),
            sequences_dir.display()
        );
        filesystem::move_entry(
            &stray_config,
            &sequences_dir.join(defaults::SEQUENCE_CONFIG_FILE),
        )?;
    }

    Ok(())
}

/// Move every file under `project_path` (at any depth) flat into
/// `sequences_dir`, then delete the project directory.
fn consolidate_project(project_path: &Path, sequences_dir: &Path) -> Result<()> {
    info!(
        "consolidating {} into {}",
        project_path.display(),
        sequences_dir.display()
    );

    let files: Vec<PathBuf> = WalkDir::new(project_path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect();

    for file in files {
        let Some(file_name) = file.file_name() else {
            continue;
        };
        let destination = sequences_dir.join(file_name);
        if destination.exists() {
            warn!(
                "overwriting {} with {}",
                destination.display(),
                file.display()
            );
        }
        filesystem::move_entry(&file, &destination)?;
    }

    fs::remove_dir_all(project_path)?;
    Ok(())
}

/// Move every direct child file of the configurations project into the
/// parent of the sequences directory, then delete the project directory.
fn relocate_configurations(project_path: &Path, parent: &Path) -> Result<()> {
    info!(
        "relocating configurations from {} to {}",
        project_path.display(),
        parent.display()
    );

    for entry in fs::read_dir(project_path)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        filesystem::move_entry(&entry.path(), &parent.join(entry.file_name()))?;
    }

    fs::remove_dir_all(project_path)?;
    Ok(())
}
