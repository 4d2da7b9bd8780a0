//! Integration tests for the sync pipeline against a mock VCS.
//!
//! These run the whole pipeline - manifest parsing included - without the
//! git binary or network access, by implementing [`seqsync::workspace::VcsOps`]
//! over fixture content.

use std::fs;
use std::path::Path;

use seqsync::error::Result;
use seqsync::manifest;
use seqsync::pipeline;
use seqsync::workspace::VcsOps;

use tempfile::TempDir;

/// Materializes per-project fixture files on checkout and records sparse
/// configuration requests, like a real clone would.
struct FixtureVcs {
    /// (project name, relative path, content)
    files: Vec<(&'static str, &'static str, &'static str)>,
}

impl VcsOps for FixtureVcs {
    fn clone_no_checkout(&self, _url: &str, path: &Path) -> Result<()> {
        let git_dir = path.join(".git");
        fs::create_dir_all(git_dir.join("objects")).unwrap();
        fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
        Ok(())
    }

    fn fetch(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn enable_sparse_checkout(&self, path: &Path, sparse_paths: &[String]) -> Result<()> {
        let info = path.join(".git").join("info");
        fs::create_dir_all(&info).unwrap();
        fs::write(info.join("sparse-checkout"), sparse_paths.join("\n")).unwrap();
        Ok(())
    }

    fn checkout(&self, path: &Path, _revision: &str) -> Result<()> {
        let project = path.file_name().unwrap().to_string_lossy().to_string();
        let sparse_file = path.join(".git").join("info").join("sparse-checkout");
        let sparse = fs::read_to_string(&sparse_file).unwrap_or_default();
        for (owner, rel, content) in &self.files {
            if *owner != project {
                continue;
            }
            // honor the sparse restriction the way a real checkout would
            if !sparse.is_empty() && !sparse.lines().any(|p| rel.starts_with(p)) {
                continue;
            }
            let file = path.join(rel);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, content).unwrap();
        }
        Ok(())
    }
}

fn write_manifest(root: &Path, content: &str) -> std::path::PathBuf {
    let path = root.join("manifest.xml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_full_pipeline_with_sparse_and_configurations() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let work = root.join("work");

    let manifest_text = format!(
        r#"<manifest>
  <property name="version" value="2.0"/>
  <remote name="origin" fetch="https://git.example.com/seq"/>
  <project name="alpha" remote="origin" path="{work}/alpha" revision="release/VERSION_PLACEHOLDER">
    <sparse path="data/seq"/>
  </project>
  <project name="beta" remote="origin" path="{work}/beta" revision="VERSION_PLACEHOLDER"/>
  <project name="configurations" remote="origin" path="{work}/configurations" revision="VERSION_PLACEHOLDER"/>
</manifest>"#,
        work = work.display()
    );
    let manifest_path = write_manifest(root, &manifest_text);

    let vcs = FixtureVcs {
        files: vec![
            ("alpha", "data/seq/one.fa", ">one"),
            ("alpha", "README.md", "not sparse"),
            ("beta", "results/deep/two.fa", ">two"),
            ("configurations", "x.json", "{}"),
            ("configurations", "sequence_config.json", "{}"),
        ],
    };

    let report = pipeline::run(&manifest_path, &vcs).unwrap();

    assert_eq!(report.synced, vec!["alpha", "beta", "configurations"]);
    assert!(report.skipped.is_empty());
    assert!(report.cleanup_failures.is_empty());

    let sequences = work.join("sequences");
    // sparse flattening happened inside alpha before consolidation
    assert!(sequences.join("one.fa").exists());
    // the non-sparse file never materialized
    assert!(!sequences.join("README.md").exists());
    // beta's nested layout was discarded
    assert!(sequences.join("two.fa").exists());
    // configurations relocated one level above sequences
    assert!(work.join("x.json").exists());
    // and the sequence config chained into sequences
    assert!(sequences.join("sequence_config.json").exists());

    assert!(!work.join("alpha").exists());
    assert!(!work.join("beta").exists());
    assert!(!work.join("configurations").exists());
}

#[test]
fn test_pipeline_revision_carries_substituted_version() {
    let temp = TempDir::new().unwrap();
    let manifest_text = r#"<manifest>
  <property name="version" value="3.1"/>
  <remote name="origin" fetch="https://git.example.com/seq"/>
  <project name="alpha" remote="origin" path="work/alpha" revision="release/VERSION_PLACEHOLDER"/>
</manifest>"#;
    let manifest_path = write_manifest(temp.path(), manifest_text);

    let parsed = manifest::from_file(&manifest_path).unwrap();
    assert_eq!(parsed.projects[0].revision, "release/3.1");
}

#[test]
fn test_pipeline_collision_last_project_wins() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    let work = root.join("work");

    let manifest_text = format!(
        r#"<manifest>
  <property name="version" value="1.0"/>
  <remote name="origin" fetch="https://git.example.com/seq"/>
  <project name="alpha" remote="origin" path="{work}/alpha" revision="main"/>
  <project name="beta" remote="origin" path="{work}/beta" revision="main"/>
</manifest>"#,
        work = work.display()
    );
    let manifest_path = write_manifest(root, &manifest_text);

    let vcs = FixtureVcs {
        files: vec![
            ("alpha", "nested/shared.fa", "from alpha"),
            ("beta", "shared.fa", "from beta"),
        ],
    };

    pipeline::run(&manifest_path, &vcs).unwrap();

    let survivor = work.join("sequences").join("shared.fa");
    assert_eq!(fs::read_to_string(survivor).unwrap(), "from beta");
}
