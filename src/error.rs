//! # Error Handling
//!
//! Centralized error handling for the `seqsync` application, built on
//! `thiserror`. The `Error` enum covers the failure modes of a sync run:
//!
//! - Manifest reading and parsing errors (fatal).
//! - Missing version property in the manifest (fatal).
//! - Git clone failures, with an optional hint for authentication problems.
//! - Other git command failures (fetch, checkout, config), all fatal.
//! - I/O errors, wrapped from `std::io::Error`.
//!
//! Conditions that are recovered locally are deliberately *not* variants of
//! this enum: an unresolved remote reference skips the project with a
//! warning, and permission failures during metadata cleanup are collected as
//! a list of [`crate::cleanup::CleanupFailure`] values instead of raised.
//!
//! The `Result<T>` alias is used throughout the library crate.

use thiserror::Error;

/// Main error type for seqsync operations
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest could not be read or its XML structure is invalid.
    #[error("Manifest error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Manifest {
        message: String,
        /// Optional hint for how to fix the manifest
        hint: Option<String>,
    },

    /// The manifest has no usable `<property name="version" value="..."/>`
    /// node, so placeholder substitution cannot run.
    #[error("version property not found in manifest")]
    MissingVersion,

    /// An error occurred while cloning a repository.
    ///
    /// Includes the clone URL, target path, error message, and an optional
    /// hint for resolution.
    #[error("Git clone error for {url} into {path}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        path: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// An error occurred while executing a git command in a workspace.
    #[error("Git command failed in {path}: {command} - {stderr}")]
    GitCommand {
        command: String,
        path: String,
        stderr: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
