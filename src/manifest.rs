//! # Manifest Schema and Parsing
//!
//! This module defines the data structures that represent the XML manifest
//! driving a sync run, as well as the logic for parsing it.
//!
//! ## Document shape
//!
//! ```xml
//! <manifest>
//!   <property name="version" value="2.1.0"/>
//!   <remote name="origin" fetch="https://git.example.com/seq"/>
//!   <project name="alpha" remote="origin" path="work/alpha" revision="VERSION_PLACEHOLDER">
//!     <sparse path="data/sequences"/>
//!   </project>
//! </manifest>
//! ```
//!
//! ## Two-pass parsing
//!
//! Parsing is a documented two-stage contract:
//!
//! 1. The raw text is parsed once, only to extract the `version` property.
//! 2. Every occurrence of the literal `VERSION_PLACEHOLDER` token in the
//!    *raw text* is replaced with that version, and the substituted text is
//!    parsed again into the structured [`Manifest`].
//!
//! The substitution must happen on text rather than on the parsed tree:
//! the placeholder may sit inside attribute values that affect structural
//! interpretation, such as revision strings.
//!
//! Unknown elements are ignored, which keeps manifests forward compatible.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use xot::Xot;

use crate::defaults;
use crate::error::{Error, Result};

/// A named fetch base URL. Immutable once parsed.
#[derive(Debug, Clone, Serialize)]
pub struct Remote {
    /// Unique remote name referenced by projects.
    pub name: String,
    /// Fetch base URL, with trailing slashes trimmed.
    pub fetch: String,
}

impl Remote {
    /// Derive the clone URL for a project hosted on this remote.
    pub fn clone_url(&self, project_name: &str) -> String {
        format!("{}/{}.git", self.fetch, project_name)
    }
}

/// One repository to synchronize into the local workspace.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    /// Repository name; also the last segment of the derived clone URL.
    pub name: String,
    /// Name of the remote this project is fetched from.
    pub remote: String,
    /// Local workspace path the repository is cloned into.
    pub path: PathBuf,
    /// Branch, tag, or commit to check out.
    pub revision: String,
    /// Sub-paths restricted via sparse checkout; empty means a full checkout.
    pub sparse_paths: Vec<String>,
}

/// Parsed manifest: version, remotes, and projects in declaration order.
///
/// Read once at process start, placeholder-substituted in memory, and never
/// persisted back.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub version: String,
    pub remotes: Vec<Remote>,
    pub projects: Vec<Project>,
}

impl Manifest {
    /// Look up a remote by name.
    pub fn remote(&self, name: &str) -> Option<&Remote> {
        self.remotes.iter().find(|r| r.name == name)
    }
}

/// Read and parse a manifest file.
pub fn from_file(path: &Path) -> Result<Manifest> {
    let text = fs::read_to_string(path).map_err(|e| Error::Manifest {
        message: format!("cannot read manifest {}: {}", path.display(), e),
        hint: None,
    })?;
    parse(&text)
}

/// Parse manifest text using the two-pass contract described in the module
/// docs: extract the version, substitute the placeholder token in the raw
/// text, then parse the substituted text into a [`Manifest`].
pub fn parse(text: &str) -> Result<Manifest> {
    let version = extract_version(text)?;
    let substituted = text.replace(defaults::VERSION_PLACEHOLDER, &version);
    parse_structure(&substituted, version)
}

fn malformed(err: impl std::fmt::Display) -> Error {
    Error::Manifest {
        message: format!("malformed manifest XML: {}", err),
        hint: None,
    }
}

/// First pass: extract the `version` property value from the raw text.
///
/// Looks for a direct `<property name="version" value="..."/>` child of the
/// manifest root. An absent node or an empty value is fatal.
fn extract_version(text: &str) -> Result<String> {
    let mut xot = Xot::new();
    let doc = xot.parse(text).map_err(malformed)?;
    let root = xot.document_element(doc).map_err(malformed)?;

    let el_property = xot.add_name("property");
    let attr_name = xot.add_name("name");
    let attr_value = xot.add_name("value");

    for node in xot.children(root).collect::<Vec<_>>() {
        let Some(element) = xot.element(node) else {
            continue;
        };
        if element.name() != el_property {
            continue;
        }
        let attributes = xot.attributes(node);
        if attributes.get(attr_name).map(|v| v.as_str()) != Some("version") {
            continue;
        }
        match attributes.get(attr_value) {
            Some(value) if !value.is_empty() => return Ok(value.to_string()),
            _ => return Err(Error::MissingVersion),
        }
    }

    Err(Error::MissingVersion)
}

/// Second pass: parse the substituted text into the structured manifest.
fn parse_structure(text: &str, version: String) -> Result<Manifest> {
    let mut xot = Xot::new();
    let doc = xot.parse(text).map_err(malformed)?;
    let root = xot.document_element(doc).map_err(malformed)?;

    let el_remote = xot.add_name("remote");
    let el_project = xot.add_name("project");
    let el_sparse = xot.add_name("sparse");
    let attr_name = xot.add_name("name");
    let attr_fetch = xot.add_name("fetch");
    let attr_remote = xot.add_name("remote");
    let attr_path = xot.add_name("path");
    let attr_revision = xot.add_name("revision");

    let mut remotes = Vec::new();
    let mut projects = Vec::new();

    for node in xot.children(root).collect::<Vec<_>>() {
        let Some(element) = xot.element(node) else {
            continue;
        };
        let element_name = element.name();

        if element_name == el_remote {
            let attributes = xot.attributes(node);
            let name = required(attributes.get(attr_name), "remote", "name")?;
            let fetch = required(attributes.get(attr_fetch), "remote", "fetch")?;
            remotes.push(Remote {
                name,
                fetch: fetch.trim_end_matches('/').to_string(),
            });
        } else if element_name == el_project {
            let (name, remote, path, revision) = {
                let attributes = xot.attributes(node);
                (
                    required(attributes.get(attr_name), "project", "name")?,
                    required(attributes.get(attr_remote), "project", "remote")?,
                    required(attributes.get(attr_path), "project", "path")?,
                    required(attributes.get(attr_revision), "project", "revision")?,
                )
            };

            let mut sparse_paths = Vec::new();
            for child in xot.children(node).collect::<Vec<_>>() {
                let Some(child_element) = xot.element(child) else {
                    continue;
                };
                if child_element.name() == el_sparse {
                    let child_attributes = xot.attributes(child);
                    sparse_paths.push(required(child_attributes.get(attr_path), "sparse", "path")?);
                }
            }

            projects.push(Project {
                name,
                remote,
                path: PathBuf::from(path),
                revision,
                sparse_paths,
            });
        }
    }

    Ok(Manifest {
        version,
        remotes,
        projects,
    })
}

fn required(value: Option<&String>, element: &str, attribute: &str) -> Result<String> {
    value.map(String::from).ok_or_else(|| Error::Manifest {
        message: format!(
            "<{}> element is missing required attribute `{}`",
            element, attribute
        ),
        hint: None,
    })
}
