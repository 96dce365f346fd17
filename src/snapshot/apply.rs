//! Snapshot apply: restore live configuration state from an archive

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::config::{ProfilePaths, DCONF_DUMP_FILE, DCONF_NAMESPACE};
use crate::error::{ProfileError, ProfileResult};
use crate::external::{ArchiveTool, SettingsTool};
use crate::models::{source_locations, ComponentSelection};

use super::fs_util::{copy_tree_lenient, wipe_dir};

/// Restores enabled components from an archive over the live configuration
pub struct SnapshotApply<'a> {
    paths: &'a ProfilePaths,
    archive: &'a dyn ArchiveTool,
    settings: &'a dyn SettingsTool,
}

impl<'a> SnapshotApply<'a> {
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

    /// Apply `archive_path` to the live system with the given selection
    ///
    /// Extraction happens into a scratch area before any destructive step, so
    /// a corrupt archive leaves live state untouched. After the core
    /// configuration directories are wiped, a failure leaves live state in a
    /// transitional condition the caller must report as possibly
    /// inconsistent.
    pub fn apply(
        &self,
        archive_path: &Path,
        selection: &ComponentSelection,
    ) -> ProfileResult<()> {
        let scratch = TempDir::new()
            .map_err(|e| ProfileError::Apply(format!("Failed to create scratch area: {}", e)))?;

        self.archive
            .unpack(archive_path, scratch.path())
            .map_err(|e| ProfileError::Apply(e.to_string()))?;

        let locations = source_locations(self.paths, selection);

        // Point of no return: live configuration is emptied from here on
        for location in locations.iter().filter(|l| l.wipe_on_apply) {
            log::info!("Wiping {}", location.live_path.display());
            wipe_dir(&location.live_path).map_err(|e| ProfileError::Apply(e.to_string()))?;
        }

        for location in locations.iter().filter(|l| l.enabled) {
            let staged = scratch.path().join(location.key);
            if !staged.exists() {
                log::warn!(
                    "Archive has no {} component; leaving {} as is",
                    location.key,
                    location.live_path.display()
                );
                continue;
            }

            if let Err(e) = fs::create_dir_all(&location.live_path) {
                log::warn!(
                    "Could not recreate {}: {}; skipping",
                    location.live_path.display(),
                    e
                );
                continue;
            }

            log::info!("Restoring {}", location.key);
            copy_tree_lenient(&staged, &location.live_path);
        }

        if selection.dconf {
            self.restore_settings(scratch.path());
        }

        Ok(())
    }

    /// Reset and reload the settings namespace from the staged blob
    ///
    /// An absent blob is not an error. Reset and load failures are warnings:
    /// blocking the whole restore on them is worse for availability than
    /// degraded settings fidelity.
    fn restore_settings(&self, scratch: &Path) {
        let blob_path = scratch.join(DCONF_DUMP_FILE);
        if !blob_path.exists() {
            log::warn!("Archive has no settings dump; leaving dconf as is");
            return;
        }

        let text = match fs::read_to_string(&blob_path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Could not read settings dump: {}; leaving dconf as is", e);
                return;
            }
        };

        log::info!("Restoring dconf namespace {}", DCONF_NAMESPACE);
        if let Err(e) = self.settings.reset(DCONF_NAMESPACE) {
            log::warn!("dconf reset failed: {}; loading anyway", e);
        }
        if let Err(e) = self.settings.load(DCONF_NAMESPACE, &text) {
            log::warn!("dconf load failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::fakes::{BrokenArchiver, DirCopyArchiver, MemorySettings};
    use crate::snapshot::SnapshotCapture;
    use tempfile::TempDir;

    fn test_env() -> (TempDir, ProfilePaths) {
        let temp = TempDir::new().unwrap();
        let paths = ProfilePaths::with_base_dirs(
            temp.path().join("profiles"),
            temp.path().join("home"),
        );
        (temp, paths)
    }

    fn populate_home(paths: &ProfilePaths) {
        fs::create_dir_all(paths.cinnamon_config_dir().join("spices")).unwrap();
        fs::write(paths.cinnamon_config_dir().join("panel.json"), "panel-v1").unwrap();
        fs::write(
            paths.cinnamon_config_dir().join("spices/applet.json"),
            "applet",
        )
        .unwrap();
        fs::create_dir_all(paths.gtk_config_dir()).unwrap();
        fs::write(paths.gtk_config_dir().join("settings.ini"), "gtk-v1").unwrap();
        fs::create_dir_all(paths.themes_dir().join("Mint-Y")).unwrap();
        fs::write(paths.themes_dir().join("Mint-Y/index.theme"), "theme-v1").unwrap();
        fs::create_dir_all(paths.local_fonts_dir()).unwrap();
        fs::write(paths.local_fonts_dir().join("custom.ttf"), "font-v1").unwrap();
    }

    #[test]
    fn test_round_trip_restores_captured_state() {
        let (temp, paths) = test_env();
        populate_home(&paths);
        let settings = MemorySettings::with_contents(DCONF_NAMESPACE, "[panel]\nheight=40\n");

        let dest = temp.path().join("snap.zip");
        SnapshotCapture::new(&paths, &DirCopyArchiver, &settings)
            .capture(&ComponentSelection::default(), &dest)
            .unwrap();

        // Drift: overwrite, add, and change settings after the capture
        fs::write(paths.cinnamon_config_dir().join("panel.json"), "drifted").unwrap();
        fs::write(paths.cinnamon_config_dir().join("extra.json"), "extra").unwrap();
        fs::write(paths.themes_dir().join("Mint-Y/index.theme"), "drifted").unwrap();
        settings.load(DCONF_NAMESPACE, "[panel]\nheight=99\n").unwrap();

        SnapshotApply::new(&paths, &DirCopyArchiver, &settings)
            .apply(&dest, &ComponentSelection::default())
            .unwrap();

        assert_eq!(
            fs::read_to_string(paths.cinnamon_config_dir().join("panel.json")).unwrap(),
            "panel-v1"
        );
        assert_eq!(
            fs::read_to_string(paths.cinnamon_config_dir().join("spices/applet.json")).unwrap(),
            "applet"
        );
        // The core config dir was wiped, so drift-only files are gone
        assert!(!paths.cinnamon_config_dir().join("extra.json").exists());
        assert_eq!(
            fs::read_to_string(paths.gtk_config_dir().join("settings.ini")).unwrap(),
            "gtk-v1"
        );
        assert_eq!(
            fs::read_to_string(paths.themes_dir().join("Mint-Y/index.theme")).unwrap(),
            "theme-v1"
        );
        assert_eq!(
            fs::read_to_string(paths.local_fonts_dir().join("custom.ttf")).unwrap(),
            "font-v1"
        );
        assert_eq!(
            settings.contents(DCONF_NAMESPACE).unwrap(),
            "[panel]\nheight=40\n"
        );
    }

    #[test]
    fn test_disabled_components_left_untouched() {
        let (temp, paths) = test_env();
        populate_home(&paths);
        let settings = MemorySettings::default();

        let dest = temp.path().join("snap.zip");
        SnapshotCapture::new(&paths, &DirCopyArchiver, &settings)
            .capture(&ComponentSelection::default(), &dest)
            .unwrap();

        fs::write(paths.themes_dir().join("Mint-Y/index.theme"), "drifted").unwrap();

        let selection = ComponentSelection {
            themes: false,
            ..ComponentSelection::default()
        };
        SnapshotApply::new(&paths, &DirCopyArchiver, &settings)
            .apply(&dest, &selection)
            .unwrap();

        // Theme drift survives because the component was deselected
        assert_eq!(
            fs::read_to_string(paths.themes_dir().join("Mint-Y/index.theme")).unwrap(),
            "drifted"
        );
    }

    #[test]
    fn test_extraction_failure_leaves_live_state_untouched() {
        let (temp, paths) = test_env();
        populate_home(&paths);
        let settings = MemorySettings::default();

        let err = SnapshotApply::new(&paths, &BrokenArchiver, &settings)
            .apply(&temp.path().join("snap.zip"), &ComponentSelection::default())
            .unwrap_err();

        assert!(matches!(err, ProfileError::Apply(_)));
        assert_eq!(
            fs::read_to_string(paths.cinnamon_config_dir().join("panel.json")).unwrap(),
            "panel-v1"
        );
        assert!(settings.calls.borrow().is_empty());
    }

    #[test]
    fn test_missing_component_in_archive_is_skipped() {
        let (temp, paths) = test_env();
        populate_home(&paths);
        let settings = MemorySettings::default();

        // Capture without themes, then apply with themes enabled
        let dest = temp.path().join("snap.zip");
        let narrow = ComponentSelection {
            themes: false,
            ..ComponentSelection::default()
        };
        SnapshotCapture::new(&paths, &DirCopyArchiver, &settings)
            .capture(&narrow, &dest)
            .unwrap();

        SnapshotApply::new(&paths, &DirCopyArchiver, &settings)
            .apply(&dest, &ComponentSelection::default())
            .unwrap();

        // The live theme tree stays as it was: absent subtree is a warning
        assert_eq!(
            fs::read_to_string(paths.themes_dir().join("Mint-Y/index.theme")).unwrap(),
            "theme-v1"
        );
    }

    #[test]
    fn test_missing_settings_blob_is_not_an_error() {
        let (temp, paths) = test_env();
        populate_home(&paths);
        let no_settings = MemorySettings::default();

        let dest = temp.path().join("snap.zip");
        SnapshotCapture::new(&paths, &DirCopyArchiver, &no_settings)
            .capture(&ComponentSelection::default(), &dest)
            .unwrap();

        let live = MemorySettings::with_contents(DCONF_NAMESPACE, "[kept]\nkey=1\n");
        SnapshotApply::new(&paths, &DirCopyArchiver, &live)
            .apply(&dest, &ComponentSelection::default())
            .unwrap();

        // No blob in the archive: dconf was neither reset nor loaded
        assert!(live.calls.borrow().is_empty());
        assert_eq!(live.contents(DCONF_NAMESPACE).unwrap(), "[kept]\nkey=1\n");
    }

    #[test]
    fn test_reset_failure_still_loads() {
        let (temp, paths) = test_env();
        populate_home(&paths);
        let source = MemorySettings::with_contents(DCONF_NAMESPACE, "[panel]\nheight=40\n");

        let dest = temp.path().join("snap.zip");
        SnapshotCapture::new(&paths, &DirCopyArchiver, &source)
            .capture(&ComponentSelection::default(), &dest)
            .unwrap();

        let live = MemorySettings {
            fail_reset: true,
            ..MemorySettings::default()
        };
        SnapshotApply::new(&paths, &DirCopyArchiver, &live)
            .apply(&dest, &ComponentSelection::default())
            .unwrap();

        let calls = live.calls.borrow();
        assert!(calls.iter().any(|c| c.starts_with("reset")));
        assert!(calls.iter().any(|c| c.starts_with("load")));
        assert_eq!(
            live.contents(DCONF_NAMESPACE).unwrap(),
            "[panel]\nheight=40\n"
        );
    }
}
