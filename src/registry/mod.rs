//! The profile registry
//!
//! A durable, ordered mapping from profile name to archive location,
//! activation flag, and last-modified timestamp, persisted as a single JSON
//! document. Owns the uniqueness and single-active-profile invariants.
//!
//! Every mutation reads the full collection, modifies it in memory, and
//! rewrites the document atomically (temp file + rename). There is no
//! inter-process lock; concurrent invocations against the same registry are
//! last-writer-wins, an accepted limitation.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use chrono::Utc;

use crate::backup::timestamp::file_timestamp;
use crate::config::ProfilePaths;
use crate::error::{ProfileError, ProfileResult};
use crate::models::Profile;

/// The persistent collection of profiles
pub struct ProfileRegistry {
    path: PathBuf,
    profiles: Vec<Profile>,
}

impl ProfileRegistry {
    /// Load the registry from its configured location
    pub fn load(paths: &ProfilePaths) -> ProfileResult<Self> {
        Self::load_from(paths.registry_file())
    }

    /// Load the registry from an explicit path
    ///
    /// A missing document yields an empty registry. A malformed document is
    /// quarantined as a timestamped side-file and replaced with an empty
    /// collection; corruption never fails the command.
    pub fn load_from(path: PathBuf) -> ProfileResult<Self> {
        let profiles = read_or_quarantine(&path)?;
        Ok(Self { path, profiles })
    }

    /// All profiles, in insertion order
    pub fn list(&self) -> &[Profile] {
        &self.profiles
    }

    /// Look up a profile by name
    pub fn find_by_name(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// The currently active profile, if any
    pub fn find_active(&self) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.active)
    }

    /// Register a new profile and mark it active
    ///
    /// # Errors
    ///
    /// Fails with [`ProfileError::Duplicate`] if the name is taken, leaving
    /// the registry unchanged.
    pub fn create(&mut self, name: &str, zip_file: PathBuf) -> ProfileResult<()> {
        if self.find_by_name(name).is_some() {
            return Err(ProfileError::duplicate_profile(name));
        }

        for profile in &mut self.profiles {
            profile.active = false;
        }
        self.profiles.push(Profile::new(name, zip_file));
        self.save()
    }

    /// Mark the named profile active, clearing every other active flag and
    /// bumping its last-modified timestamp
    pub fn set_active(&mut self, name: &str) -> ProfileResult<()> {
        if self.find_by_name(name).is_none() {
            return Err(ProfileError::profile_not_found(name));
        }

        for profile in &mut self.profiles {
            profile.active = profile.name == name;
            if profile.active {
                profile.last_modified = Utc::now();
            }
        }
        self.save()
    }

    /// Bump the named profile's last-modified timestamp
    pub fn touch(&mut self, name: &str) -> ProfileResult<()> {
        let profile = self
            .profiles
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| ProfileError::profile_not_found(name))?;
        profile.last_modified = Utc::now();
        self.save()
    }

    /// Remove the named profile and delete its archive
    ///
    /// Archive deletion is best-effort: a missing or undeletable archive is
    /// logged as a warning and never blocks removal of the registry entry.
    pub fn remove(&mut self, name: &str) -> ProfileResult<Profile> {
        let index = self
            .profiles
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| ProfileError::profile_not_found(name))?;

        let profile = self.profiles.remove(index);

        if profile.zip_file.exists() {
            if let Err(e) = fs::remove_file(&profile.zip_file) {
                log::warn!(
                    "Could not delete archive {}: {}",
                    profile.zip_file.display(),
                    e
                );
            }
        } else {
            log::warn!(
                "Archive {} was already gone; removing registry entry anyway",
                profile.zip_file.display()
            );
        }

        self.save()?;
        Ok(profile)
    }

    /// Rewrite the whole registry document atomically
    fn save(&self) -> ProfileResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ProfileError::Io(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        // Write to a temp file in the same directory, then rename over the
        // registry so readers never observe a partial document
        let temp_path = self.path.with_extension("json.tmp");

        let file = File::create(&temp_path)
            .map_err(|e| ProfileError::Io(format!("Failed to create temp file: {}", e)))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.profiles)
            .map_err(|e| ProfileError::Json(format!("Failed to serialize registry: {}", e)))?;
        writer
            .flush()
            .map_err(|e| ProfileError::Io(format!("Failed to flush registry: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| ProfileError::Io(format!("Failed to sync registry: {}", e)))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ProfileError::Io(format!("Failed to rename temp file: {}", e))
        })?;

        Ok(())
    }
}

/// Read the registry document, quarantining a malformed one
fn read_or_quarantine(path: &PathBuf) -> ProfileResult<Vec<Profile>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| ProfileError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    match serde_json::from_str(&contents) {
        Ok(profiles) => Ok(profiles),
        Err(parse_err) => {
            let quarantine = path.with_extension(format!("json.corrupt-{}", file_timestamp()));
            fs::rename(path, &quarantine).map_err(|e| {
                ProfileError::Io(format!(
                    "Failed to quarantine corrupt registry {}: {}",
                    path.display(),
                    e
                ))
            })?;
            log::warn!(
                "Registry {} was corrupt ({}); preserved as {} and starting empty",
                path.display(),
                parse_err,
                quarantine.display()
            );
            Ok(Vec::new())
        }
    }
}
