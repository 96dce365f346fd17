//! Snapshot capture: live configuration state into one archive

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::config::{ProfilePaths, DCONF_DUMP_FILE, DCONF_NAMESPACE};
use crate::error::{ProfileError, ProfileResult};
use crate::external::{ArchiveTool, SettingsTool};
use crate::models::{source_locations, ComponentSelection};

use super::fs_util::copy_tree_lenient;

/// Captures enabled source locations and the settings dump into an archive
pub struct SnapshotCapture<'a> {
    paths: &'a ProfilePaths,
    archive: &'a dyn ArchiveTool,
    settings: &'a dyn SettingsTool,
}

impl<'a> SnapshotCapture<'a> {
    pub fn new(
        paths: &'a ProfilePaths,
        archive: &'a dyn ArchiveTool,
        settings: &'a dyn SettingsTool,
    ) -> Self {
        Self {
            paths,
            archive,
            settings,
        }
    }

    /// Capture the selected components into `dest_archive`
    ///
    /// Missing source locations and individual unreadable files are skipped
    /// with warnings; only the final pack step is fatal.
    pub fn capture(
        &self,
        selection: &ComponentSelection,
        dest_archive: &Path,
    ) -> ProfileResult<()> {
        let scratch = TempDir::new()
            .map_err(|e| ProfileError::Capture(format!("Failed to create scratch area: {}", e)))?;

        for location in source_locations(self.paths, selection)
            .iter()
            .filter(|l| l.enabled)
        {
            if !location.live_path.exists() {
                log::warn!(
                    "Source location {} ({}) does not exist; skipping",
                    location.key,
                    location.live_path.display()
                );
                continue;
            }

            let staged = scratch.path().join(location.key);
            if let Err(e) = fs::create_dir_all(&staged) {
                log::warn!("Could not stage {}: {}; skipping", location.key, e);
                continue;
            }

            log::info!("Capturing {}", location.key);
            copy_tree_lenient(&location.live_path, &staged);
        }

        if selection.dconf {
            self.capture_settings(scratch.path());
        }

        self.archive
            .pack(scratch.path(), dest_archive)
            .map_err(|e| ProfileError::Capture(e.to_string()))
    }

    /// Dump the settings namespace into the scratch area
    ///
    /// A failed or empty dump means "no settings captured": warn and leave
    /// the blob out of the archive.
    fn capture_settings(&self, scratch: &Path) {
        match self.settings.dump(DCONF_NAMESPACE) {
            Ok(text) if text.trim().is_empty() => {
                log::warn!("dconf dump of {} was empty; no settings captured", DCONF_NAMESPACE);
            }
            Ok(text) => {
                if let Err(e) = fs::write(scratch.join(DCONF_DUMP_FILE), text) {
                    log::warn!("Could not stage settings dump: {}", e);
                }
            }
            Err(e) => {
                log::warn!("dconf dump failed: {}; no settings captured", e);
            }
        }
    }
}
