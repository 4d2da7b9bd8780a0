//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_manifest(manifests::MINIMAL);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    #[allow(unused_imports)]
    pub use super::TestFixture;
}

/// Common manifest XML snippets for testing.
#[allow(dead_code)]
pub mod manifests {
    /// Minimal valid manifest with one remote and no projects.
    pub const MINIMAL: &str = r#"<manifest>
  <property name="version" value="1.0"/>
  <remote name="origin" fetch="https://git.example.com/seq"/>
</manifest>"#;

    /// Manifest whose only project references an undeclared remote.
    pub const UNKNOWN_REMOTE: &str = r#"<manifest>
  <property name="version" value="1.0"/>
  <remote name="origin" fetch="https://git.example.com/seq"/>
  <project name="alpha" remote="ghost" path="work/alpha" revision="main"/>
</manifest>"#;

    /// Manifest without the version property (fatal at parse time).
    pub const MISSING_VERSION: &str = r#"<manifest>
  <remote name="origin" fetch="https://git.example.com/seq"/>
</manifest>"#;

    /// Structurally invalid XML for error testing.
    pub const INVALID_XML: &str = "<manifest><property name=\"version\"";
}

/// A test fixture that provides a temporary directory with an optional
/// manifest file.
pub struct TestFixture {
    pub temp: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp: assert_fs::TempDir::new().unwrap(),
        }
    }

    /// Write `content` as `manifest.xml` inside the fixture directory.
    pub fn with_manifest(self, content: &str) -> Self {
        self.temp.child("manifest.xml").write_str(content).unwrap();
        self
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.temp.path().join("manifest.xml")
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}

/// Run a git command in the given directory, panicking on failure. Only used
/// by tests gated behind the `integration-tests` feature.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .status()
        .expect("git binary available");
    assert!(status.success(), "git {:?} failed in {}", args, dir.display());
}

/// Build a bare fixture repository `<remotes>/<name>.git` containing `files`
/// committed and tagged `v1.0`.
#[allow(dead_code)]
pub fn build_fixture_remote(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let work = root.join(format!("{}-work", name));
    std::fs::create_dir_all(&work).unwrap();

    let status = Command::new("git")
        .arg("init")
        .arg("-q")
        .arg(&work)
        .status()
        .expect("git binary available");
    assert!(status.success());

    git(&work, &["config", "user.email", "test@example.com"]);
    git(&work, &["config", "user.name", "Test"]);

    for (rel, content) in files {
        let file = work.join(rel);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(file, content).unwrap();
    }

    git(&work, &["add", "-A"]);
    git(&work, &["commit", "-qm", "fixture"]);
    git(&work, &["tag", "v1.0"]);

    let remotes = root.join("remotes");
    std::fs::create_dir_all(&remotes).unwrap();
    let bare = remotes.join(format!("{}.git", name));
    let status = Command::new("git")
        .arg("clone")
        .arg("-q")
        .arg("--bare")
        .arg(&work)
        .arg(&bare)
        .status()
        .expect("git binary available");
    assert!(status.success());

    std::fs::remove_dir_all(&work).unwrap();
    bare
}
