//! Sync command implementation
//!
//! The sync command executes the full pipeline:
//! 1. Parse the manifest (two-pass placeholder substitution)
//! 2. Clone or update every project at its target revision
//! 3. Delete version-control metadata under each project
//! 4. Reorganize everything into the sequences layout

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use seqsync::defaults;
use seqsync::output::{emoji, OutputConfig};
use seqsync::pipeline;
use seqsync::workspace::SystemGit;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the manifest file
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "SEQSYNC_MANIFEST",
        default_value = defaults::DEFAULT_MANIFEST_FILE
    )]
    pub manifest: PathBuf,

    /// Show detailed progress information
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the sync command
pub fn execute(args: SyncArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let start_time = Instant::now();

    if !args.manifest.exists() {
        anyhow::bail!("Manifest file not found: {}", args.manifest.display());
    }

    if !args.quiet {
        println!(
            "{} Synchronizing manifest: {}",
            emoji(&out, "🔄", "[SYNC]"),
            args.manifest.display()
        );
        println!();
    }

    if !args.quiet && args.verbose {
        println!(
            "{} Parsing manifest: {}",
            emoji(&out, "📋", "[READ]"),
            args.manifest.display()
        );
    }

    let report = pipeline::run(&args.manifest, &SystemGit)?;

    if !args.quiet {
        let duration = start_time.elapsed();
        println!(
            "{} Synchronized {} project(s) in {:.2}s",
            emoji(&out, "✅", "[OK]"),
            report.synced.len(),
            duration.as_secs_f64()
        );
        for name in &report.skipped {
            println!("   skipped {} (unresolved remote)", name);
        }
        if !report.cleanup_failures.is_empty() {
            println!(
                "   {} file(s) could not be removed during metadata cleanup",
                report.cleanup_failures.len()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_missing_manifest() {
        let args = SyncArgs {
            manifest: PathBuf::from("/nonexistent/manifest.xml"),
            verbose: false,
            quiet: true,
        };

        let result = execute(args, "never");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Manifest file not found"));
    }

    #[test]
    fn test_execute_invalid_manifest() {
        let temp = tempfile::TempDir::new().unwrap();
        let manifest = temp.path().join("manifest.xml");
        std::fs::write(&manifest, "<manifest></manifest>").unwrap();

        let args = SyncArgs {
            manifest,
            verbose: false,
            quiet: true,
        };

        // No version property: the run aborts before any git invocation.
        let result = execute(args, "never");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("version property not found"));
    }
}
