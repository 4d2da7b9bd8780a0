//! On-disk filesystem helpers shared by flattening, cleanup, and
//! reorganization.
//!
//! All operations here are synchronous and assume the process exclusively
//! owns the workspace directories for the duration of a run.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Move a file or directory, replacing an existing destination file.
///
/// Tries a rename first; when that fails (typically a cross-device move or a
/// directory landing on an existing directory), falls back to copying the
/// contents and removing the source.
pub fn move_entry(src: &Path, dst: &Path) -> io::Result<()> {
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }

    if src.is_dir() {
        copy_dir_recursive(src, dst)?;
        fs::remove_dir_all(src)
    } else {
        fs::copy(src, dst)?;
        fs::remove_file(src)
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Force every entry under `path` (inclusive) writable, best effort.
///
/// Failures are ignored; the caller's subsequent removal surfaces anything
/// that is still not deletable.
pub fn make_tree_writable(path: &Path) {
    for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
        if let Ok(metadata) = entry.metadata() {
            let mut permissions = metadata.permissions();
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                permissions.set_mode(0o777);
            }
            #[cfg(not(unix))]
            {
                permissions.set_readonly(false);
            }
            let _ = fs::set_permissions(entry.path(), permissions);
        }
    }
}
