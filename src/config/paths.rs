//! Path management for cinnamon-profiles
//!
//! Resolves the profiles root directory and every live configuration
//! location the tool captures and restores. Built once at process start and
//! passed by reference into every component; there is no ambient global
//! path state.
//!
//! ## Profiles Root Resolution Order
//!
//! 1. `CINNAMON_PROFILES_DIR` environment variable (if set)
//! 2. `~/.cinnamon-profiles`

use std::path::PathBuf;

use directories::UserDirs;
use uuid::Uuid;

use crate::error::ProfileError;

/// Manages all paths used by cinnamon-profiles
#[derive(Debug, Clone)]
pub struct ProfilePaths {
    /// Base directory for the registry, archives and backups
    profiles_root: PathBuf,
    /// The user's home directory (live configuration lives under it)
    home: PathBuf,
    /// Preferred directory for export packages, if the platform has one
    download_dir: Option<PathBuf>,
}

impl ProfilePaths {
    /// Create a new ProfilePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ProfileError> {
        let user_dirs = UserDirs::new()
            .ok_or_else(|| ProfileError::Config("Could not determine home directory".into()))?;
        let home = user_dirs.home_dir().to_path_buf();

        let profiles_root = if let Ok(custom) = std::env::var("CINNAMON_PROFILES_DIR") {
            PathBuf::from(custom)
        } else {
            home.join(".cinnamon-profiles")
        };

        let download_dir = user_dirs.download_dir().map(|p| p.to_path_buf());

        Ok(Self {
            profiles_root,
            home,
            download_dir,
        })
    }

    /// Create ProfilePaths with explicit base directories (useful for testing)
    pub fn with_base_dirs(profiles_root: PathBuf, home: PathBuf) -> Self {
        Self {
            profiles_root,
            home,
            download_dir: None,
        }
    }

    /// Get the profiles root directory
    pub fn profiles_root(&self) -> &PathBuf {
        &self.profiles_root
    }

    /// Get the user's home directory
    pub fn home(&self) -> &PathBuf {
        &self.home
    }

    /// Get the path to the profile registry document
    pub fn registry_file(&self) -> PathBuf {
        self.profiles_root.join("profiles.json")
    }

    /// Get the manual backup tier directory
    pub fn backup_dir(&self) -> PathBuf {
        self.profiles_root.join("backup")
    }

    /// Get the automatic backup tier directory
    pub fn auto_backup_dir(&self) -> PathBuf {
        self.profiles_root.join("auto-backup")
    }

    /// Allocate an archive path for a new profile: `<root>/<name>-<uuid>.zip`
    pub fn new_profile_archive(&self, name: &str) -> PathBuf {
        self.profiles_root
            .join(format!("{}-{}.zip", name, Uuid::new_v4()))
    }

    /// Directory export packages are written to (downloads, or home)
    pub fn export_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(|| self.home.clone())
    }

    /// Cinnamon's own configuration directory (wiped and restored on apply)
    pub fn cinnamon_config_dir(&self) -> PathBuf {
        self.home.join(".config").join("cinnamon")
    }

    /// GTK 3 configuration directory (wiped and restored on apply)
    pub fn gtk_config_dir(&self) -> PathBuf {
        self.home.join(".config").join("gtk-3.0")
    }

    /// User theme directory (`~/.themes`)
    pub fn themes_dir(&self) -> PathBuf {
        self.home.join(".themes")
    }

    /// User icon directory (`~/.icons`)
    pub fn icons_dir(&self) -> PathBuf {
        self.home.join(".icons")
    }

    /// User font directory (`~/.fonts`)
    pub fn fonts_dir(&self) -> PathBuf {
        self.home.join(".fonts")
    }

    /// XDG data theme directory (`~/.local/share/themes`)
    pub fn local_themes_dir(&self) -> PathBuf {
        self.home.join(".local").join("share").join("themes")
    }

    /// XDG data icon directory (`~/.local/share/icons`)
    pub fn local_icons_dir(&self) -> PathBuf {
        self.home.join(".local").join("share").join("icons")
    }

    /// XDG data font directory (`~/.local/share/fonts`)
    pub fn local_fonts_dir(&self) -> PathBuf {
        self.home.join(".local").join("share").join("fonts")
    }

    /// Ensure the profiles root and both backup tiers exist
    pub fn ensure_directories(&self) -> Result<(), ProfileError> {
        std::fs::create_dir_all(&self.profiles_root).map_err(|e| {
            ProfileError::Io(format!("Failed to create profiles directory: {}", e))
        })?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| ProfileError::Io(format!("Failed to create backup directory: {}", e)))?;

        std::fs::create_dir_all(self.auto_backup_dir()).map_err(|e| {
            ProfileError::Io(format!("Failed to create auto-backup directory: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("profiles");
        let home = temp_dir.path().join("home");
        let paths = ProfilePaths::with_base_dirs(root.clone(), home.clone());

        assert_eq!(paths.profiles_root(), &root);
        assert_eq!(paths.registry_file(), root.join("profiles.json"));
        assert_eq!(paths.backup_dir(), root.join("backup"));
        assert_eq!(paths.auto_backup_dir(), root.join("auto-backup"));
        assert_eq!(paths.cinnamon_config_dir(), home.join(".config/cinnamon"));
        assert_eq!(paths.gtk_config_dir(), home.join(".config/gtk-3.0"));
        assert_eq!(paths.themes_dir(), home.join(".themes"));
        assert_eq!(paths.local_fonts_dir(), home.join(".local/share/fonts"));
    }

    #[test]
    fn test_export_dir_falls_back_to_home() {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().to_path_buf();
        let paths = ProfilePaths::with_base_dirs(home.join("root"), home.clone());

        assert_eq!(paths.export_dir(), home);
    }

    #[test]
    fn test_new_profile_archive_naming() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ProfilePaths::with_base_dirs(
            temp_dir.path().to_path_buf(),
            temp_dir.path().to_path_buf(),
        );

        let archive = paths.new_profile_archive("work");
        let filename = archive.file_name().unwrap().to_string_lossy().to_string();
        assert!(filename.starts_with("work-"));
        assert!(filename.ends_with(".zip"));
        // name + dash + uuid (36 chars) + .zip
        assert_eq!(filename.len(), "work-".len() + 36 + ".zip".len());

        // Two allocations never collide
        assert_ne!(archive, paths.new_profile_archive("work"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("profiles");
        let paths = ProfilePaths::with_base_dirs(root.clone(), temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(root.exists());
        assert!(paths.backup_dir().exists());
        assert!(paths.auto_backup_dir().exists());
    }
}
