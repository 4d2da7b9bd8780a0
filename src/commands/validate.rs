//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a manifest
//! without touching the network or the workspace.
//!
//! ## Functionality
//!
//! - **Structural validation**: the manifest parses, the version property is
//!   present, and every element carries its required attributes.
//! - **Remote resolution**: every project's `remote` attribute must name a
//!   declared remote; unresolved references are reported (at sync time they
//!   would skip the project).
//! - **Fetch URL sanity**: remote fetch values are checked with the `url`
//!   crate; non-URL values are reported as warnings since git also accepts
//!   local paths.
//!
//! This command is a safe, read-only operation that does not modify any
//! files.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use url::Url;

use seqsync::defaults;
use seqsync::manifest::{self, Manifest};
use seqsync::output::{emoji, OutputConfig};

/// Validate a manifest file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the manifest file to validate
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "SEQSYNC_MANIFEST",
        default_value = defaults::DEFAULT_MANIFEST_FILE
    )]
    pub manifest: PathBuf,

    /// Use strict validation (fail on warnings)
    #[arg(long)]
    pub strict: bool,

    /// Emit a machine-readable JSON summary instead of text output
    #[arg(long)]
    pub json: bool,
}

/// Machine-readable validation summary for `--json`.
#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    manifest: &'a Manifest,
    warnings: &'a [String],
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    if !args.json {
        println!(
            "{} Validating manifest: {}",
            emoji(&out, "🔍", "[SCAN]"),
            args.manifest.display()
        );
    }

    let manifest = match manifest::from_file(&args.manifest) {
        Ok(manifest) => manifest,
        Err(e) => {
            if !args.json {
                println!("{} Manifest parsing failed: {}", emoji(&out, "❌", "[ERR]"), e);
            }
            return Err(e.into());
        }
    };

    let warnings = collect_warnings(&manifest);

    if args.json {
        let report = ValidationReport {
            manifest: &manifest,
            warnings: &warnings,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} Parsed version {} with {} remote(s) and {} project(s)",
            emoji(&out, "✅", "[OK]"),
            manifest.version,
            manifest.remotes.len(),
            manifest.projects.len()
        );
        for warning in &warnings {
            println!("{} {}", emoji(&out, "⚠️", "[WARN]"), warning);
        }
    }

    if args.strict && !warnings.is_empty() {
        anyhow::bail!("validation produced {} warning(s)", warnings.len());
    }

    Ok(())
}

fn collect_warnings(manifest: &Manifest) -> Vec<String> {
    let mut warnings = Vec::new();

    for (index, remote) in manifest.remotes.iter().enumerate() {
        if manifest.remotes[..index].iter().any(|r| r.name == remote.name) {
            warnings.push(format!("duplicate remote name `{}`", remote.name));
        }
        // git also accepts plain filesystem paths, so a parse failure is
        // only worth a warning
        if Url::parse(&remote.fetch).is_err() && !PathBuf::from(&remote.fetch).is_absolute() {
            warnings.push(format!(
                "remote `{}` fetch value `{}` is neither a URL nor an absolute path",
                remote.name, remote.fetch
            ));
        }
    }

    for project in &manifest.projects {
        if manifest.remote(&project.remote).is_none() {
            warnings.push(format!(
                "project `{}` references undeclared remote `{}` and would be skipped",
                project.name, project.remote
            ));
        }
    }

    if manifest.projects.is_empty() {
        warnings.push("manifest declares no projects".to_string());
    }

    warnings
}
