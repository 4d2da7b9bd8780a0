//! # Seqsync Library
//!
//! Core functionality for the `seqsync` command-line tool: manifest-driven
//! aggregation of remote repositories into a flattened "sequences" tree.
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`)**: the XML document enumerating remotes and
//!   projects to synchronize, parsed with a two-pass placeholder
//!   substitution.
//! - **Workspace Synchronization (`workspace`, `git`)**: clones or updates
//!   each project with the system git command, applies sparse-checkout
//!   restrictions, and flattens sparse sub-paths.
//! - **Metadata Cleanup (`cleanup`)**: removes version-control metadata
//!   directories with a two-tier permission-tolerant deletion strategy.
//! - **Reorganization (`reorganize`)**: consolidates project files into the
//!   shared sequences directory, with special handling for the
//!   `configurations` project.
//! - **Pipeline (`pipeline`)**: the sequential orchestration of the steps
//!   above.
//!
//! ## Execution Flow
//!
//! The main entry point is [`pipeline::run`], which executes:
//!
//! 1. **Parse**: read the manifest, extract the version, substitute the
//!    placeholder token, and re-parse.
//! 2. **Synchronize**: clone or update each project at its revision.
//! 3. **Cleanup**: delete version-control metadata under each project.
//! 4. **Reorganize**: flatten everything into the sequences layout.
//!
//! Version-control actions are abstracted behind [`workspace::VcsOps`] so
//! the whole pipeline can be exercised in tests without network access.

pub mod cleanup;
pub mod defaults;
pub mod error;
pub mod filesystem;
pub mod git;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod reorganize;
pub mod workspace;
