//! Archive adapter wrapping the external `zip`/`unzip` utilities

use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::{ProfileError, ProfileResult};

/// A minimal valid zip archive: the end-of-central-directory record alone.
/// Written directly when packing an empty directory, since `zip` refuses to
/// create an archive with nothing in it.
const EMPTY_ZIP: [u8; 22] = [
    0x50, 0x4b, 0x05, 0x06, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

/// Produces an archive from a directory's contents and extracts archives
pub trait ArchiveTool {
    /// Create `dest_archive` containing the recursive contents of
    /// `source_dir` (not the directory itself). An empty source directory
    /// still produces a valid, empty archive and logs a warning.
    fn pack(&self, source_dir: &Path, dest_archive: &Path) -> ProfileResult<()>;

    /// Extract `archive` into `dest_dir` with overwrite semantics, creating
    /// the directory if absent.
    fn unpack(&self, archive: &Path, dest_dir: &Path) -> ProfileResult<()>;
}

/// Production archive adapter spawning `zip -r` / `unzip -o`
pub struct ZipCommand;

impl ArchiveTool for ZipCommand {
    fn pack(&self, source_dir: &Path, dest_archive: &Path) -> ProfileResult<()> {
        let entries = list_entry_names(source_dir)?;

        if let Some(parent) = dest_archive.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ProfileError::ArchiveWrite(format!("Failed to create {}: {}", parent.display(), e)))?;
        }

        // zip appends to an existing archive, and a failed pack must not
        // destroy the previous one. Build a sibling staging archive and
        // rename it over the destination only once zip has succeeded.
        let staging = dest_archive.with_extension("zip.tmp");
        if staging.exists() {
            fs::remove_file(&staging).map_err(|e| {
                ProfileError::ArchiveWrite(format!(
                    "Failed to clear stale staging archive {}: {}",
                    staging.display(),
                    e
                ))
            })?;
        }

        if entries.is_empty() {
            log::warn!(
                "Nothing to archive in {}; writing an empty archive",
                source_dir.display()
            );
            fs::write(&staging, EMPTY_ZIP).map_err(|e| {
                ProfileError::ArchiveWrite(format!("Failed to write empty archive: {}", e))
            })?;
        } else {
            let output = Command::new("zip")
                .arg("-r")
                .arg("-q")
                .arg(&staging)
                .args(&entries)
                .current_dir(source_dir)
                .output()
                .map_err(|e| ProfileError::ArchiveWrite(format!("Failed to run zip: {}", e)))?;

            if !output.status.success() {
                let _ = fs::remove_file(&staging);
                return Err(ProfileError::ArchiveWrite(format!(
                    "zip exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                )));
            }
        }

        fs::rename(&staging, dest_archive).map_err(|e| {
            let _ = fs::remove_file(&staging);
            ProfileError::ArchiveWrite(format!(
                "Failed to move archive into place at {}: {}",
                dest_archive.display(),
                e
            ))
        })
    }

    fn unpack(&self, archive: &Path, dest_dir: &Path) -> ProfileResult<()> {
        fs::create_dir_all(dest_dir).map_err(|e| {
            ProfileError::ArchiveRead(format!("Failed to create {}: {}", dest_dir.display(), e))
        })?;

        let output = Command::new("unzip")
            .arg("-o")
            .arg("-q")
            .arg(archive)
            .arg("-d")
            .arg(dest_dir)
            .output()
            .map_err(|e| ProfileError::ArchiveRead(format!("Failed to run unzip: {}", e)))?;

        // Exit code 1 means "completed with warnings", which includes
        // extracting an empty archive
        match output.status.code() {
            Some(0) | Some(1) => Ok(()),
            _ => Err(ProfileError::ArchiveRead(format!(
                "unzip exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }
}

/// List the entry names (not paths) of a directory's immediate contents
fn list_entry_names(dir: &Path) -> ProfileResult<Vec<std::ffi::OsString>> {
    let read_dir = fs::read_dir(dir).map_err(|e| {
        ProfileError::ArchiveWrite(format!("Failed to list {}: {}", dir.display(), e))
    })?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| {
            ProfileError::ArchiveWrite(format!("Failed to list {}: {}", dir.display(), e))
        })?;
        names.push(entry.file_name());
    }
    names.sort();
    Ok(names)
}
