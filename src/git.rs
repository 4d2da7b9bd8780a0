//! Git subprocess wrappers for the sync workflow.
//!
//! This uses the system git command, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! Error policy: a non-zero exit status from any git invocation is fatal for
//! the run. There are no retries.

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Clone a repository into `target_dir` without checking out a working tree.
///
/// The revision is checked out separately with [`checkout`], after sparse
/// checkout configuration has been applied.
pub fn clone_no_checkout(url: &str, target_dir: &Path) -> Result<()> {
    // Create parent directory if it doesn't exist
    if let Some(parent) = target_dir.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let output = Command::new("git")
        .args(["clone", "--no-checkout", url])
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            path: target_dir.display().to_string(),
            message: e.to_string(),
            hint: None,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Provide helpful error message for common auth failures
        let hint = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            Some(
                "make sure you have access to the repository: SSH key added to \
                 ssh-agent, git credentials configured, or a personal access token set up"
                    .to_string(),
            )
        } else {
            None
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            path: target_dir.display().to_string(),
            message: stderr.to_string(),
            hint,
        });
    }

    Ok(())
}

/// Fetch updates for an already-cloned workspace.
pub fn fetch(workspace: &Path) -> Result<()> {
    run_in(workspace, &["fetch"])
}

/// Check out a revision (branch, tag, or commit) in a workspace.
pub fn checkout(workspace: &Path, revision: &str) -> Result<()> {
    run_in(workspace, &["checkout", revision])
}

/// Enable sparse-checkout mode and write one inclusion pattern per sparse
/// path to the workspace's sparse-checkout configuration.
pub fn enable_sparse_checkout(workspace: &Path, sparse_paths: &[String]) -> Result<()> {
    run_in(workspace, &["config", "core.sparseCheckout", "true"])?;

    let sparse_file = workspace.join(".git").join("info").join("sparse-checkout");
    if let Some(parent) = sparse_file.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut patterns = String::new();
    for sparse_path in sparse_paths {
        patterns.push_str(&sparse_pattern(sparse_path));
        patterns.push('\n');
    }
    fs::write(&sparse_file, patterns)?;

    Ok(())
}

/// Inclusion pattern for one sparse path: the path's contents, recursively.
fn sparse_pattern(sparse_path: &str) -> String {
    format!("{}/*", sparse_path.trim_end_matches('/'))
}

/// Run a git command inside a workspace via `git -C <workspace>`.
fn run_in(workspace: &Path, args: &[&str]) -> Result<()> {
    let command = format!("git {}", args.join(" "));

    let output = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(args)
        .output()
        .map_err(|e| Error::GitCommand {
            command: command.clone(),
            path: workspace.display().to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command,
            path: workspace.display().to_string(),
            stderr: stderr.to_string(),
        });
    }

    Ok(())
}
