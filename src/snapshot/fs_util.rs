//! Filesystem helpers for snapshot staging and restore

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{ProfileError, ProfileResult};

/// Recursively copy the contents of `src` into `dest`, skipping failures
///
/// A single unreadable file (permission-denied theme file, broken symlink)
/// must never abort a whole capture or restore; each failure is logged as a
/// warning and the walk continues.
pub fn copy_tree_lenient(src: &Path, dest: &Path) {
    for entry in WalkDir::new(src) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", src.display(), e);
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let relative = match entry.path().strip_prefix(src) {
            Ok(relative) => relative,
            Err(e) => {
                log::warn!("Skipping entry {}: {}", entry.path().display(), e);
                continue;
            }
        };
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            if let Err(e) = fs::create_dir_all(&target) {
                log::warn!("Skipping subtree {}: {}", entry.path().display(), e);
            }
        } else if let Err(e) = fs::copy(entry.path(), &target) {
            log::warn!("Skipping file {}: {}", entry.path().display(), e);
        }
    }
}

/// Empty a directory, recreating it afterwards
///
/// Recreation is unconditional: the emptying primitive removes the directory
/// itself, and a wiped-but-missing live directory would break the copy that
/// follows.
pub fn wipe_dir(path: &Path) -> ProfileResult<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .map_err(|e| ProfileError::Io(format!("Failed to wipe {}: {}", path.display(), e)))?;
    }
    fs::create_dir_all(path)
        .map_err(|e| ProfileError::Io(format!("Failed to recreate {}: {}", path.display(), e)))?;
    Ok(())
}
