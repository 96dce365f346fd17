//! Capture-before-mutate orchestration
//!
//! Every mutating command walks the same state machine: confirm, take an
//! automatic pre-mutation backup, apply (or re-capture, for `update`), then
//! commit registry state. A declined confirmation is a clean abort with zero
//! side effects, not an error.

use std::path::{Path, PathBuf};

use crate::config::ProfilePaths;
use crate::error::{ProfileError, ProfileResult};
use crate::external::{ArchiveTool, SettingsTool};
use crate::models::ComponentSelection;
use crate::registry::ProfileRegistry;
use crate::snapshot::{SnapshotApply, SnapshotCapture};

use super::manager::BackupManager;

/// Asks the user to confirm a destructive action
pub trait Confirm {
    /// Returns true when the user accepts
    fn confirm(&self, prompt: &str) -> bool;
}

/// Flags shared by all mutating commands
#[derive(Debug, Clone, Copy, Default)]
pub struct MutationOptions {
    /// Skip all confirmation prompts
    pub assume_yes: bool,
    /// Skip the automatic pre-mutation backup
    pub skip_backup: bool,
}

/// How a mutating command ended
#[derive(Debug)]
pub enum MutationOutcome {
    /// The mutation ran; `backup` is the pre-mutation backup if one was made
    Applied { backup: Option<PathBuf> },
    /// The user declined a confirmation; nothing was touched
    Aborted,
}

/// Result of the pre-mutation backup step
enum PreBackup {
    Created(PathBuf),
    /// Disabled by flag, or failed and the user chose to continue
    Skipped,
    /// Failed and the user declined to continue
    Aborted,
}

impl PreBackup {
    fn path(&self) -> Option<PathBuf> {
        match self {
            Self::Created(path) => Some(path.clone()),
            _ => None,
        }
    }
}

/// Sequences confirm, backup, apply, and registry commit
pub struct BackupOrchestrator<'a> {
    paths: &'a ProfilePaths,
    archive: &'a dyn ArchiveTool,
    settings: &'a dyn SettingsTool,
    confirm: &'a dyn Confirm,
}

impl<'a> BackupOrchestrator<'a> {
    pub fn new(
        paths: &'a ProfilePaths,
        archive: &'a dyn ArchiveTool,
        settings: &'a dyn SettingsTool,
        confirm: &'a dyn Confirm,
    ) -> Self {
        Self {
            paths,
            archive,
            settings,
            confirm,
        }
    }

    /// Switch to the named profile
    ///
    /// Switching to the already-active profile is valid; it re-applies the
    /// stored snapshot and resets any unsaved drift.
    pub fn switch(
        &self,
        registry: &mut ProfileRegistry,
        name: &str,
        selection: &ComponentSelection,
        opts: &MutationOptions,
    ) -> ProfileResult<MutationOutcome> {
        let profile = registry
            .find_by_name(name)
            .ok_or_else(|| ProfileError::profile_not_found(name))?
            .clone();

        let prompt = if profile.active {
            format!(
                "Profile '{}' is already active. Re-apply it and discard unsaved changes?",
                profile.name
            )
        } else {
            format!(
                "Switching to '{}' will overwrite your current configuration. Continue?",
                profile.name
            )
        };
        if !self.ask(opts, &prompt) {
            return Ok(MutationOutcome::Aborted);
        }

        let backup = match self.pre_mutate_backup(
            &format!("pre-switch-to-{}-", profile.name),
            selection,
            opts,
        )? {
            PreBackup::Aborted => return Ok(MutationOutcome::Aborted),
            outcome => outcome,
        };

        let apply = SnapshotApply::new(self.paths, self.archive, self.settings);
        match apply.apply(&profile.zip_file, selection) {
            Ok(()) => {
                registry.set_active(&profile.name)?;
                Ok(MutationOutcome::Applied {
                    backup: backup.path(),
                })
            }
            Err(e) => {
                self.report_failed_mutation(&backup);
                Err(e)
            }
        }
    }

    /// Restore a backup archive over the live configuration
    pub fn restore(
        &self,
        backup_archive: &Path,
        selection: &ComponentSelection,
        opts: &MutationOptions,
    ) -> ProfileResult<MutationOutcome> {
        if !backup_archive.exists() {
            return Err(ProfileError::backup_not_found(
                backup_archive.display().to_string(),
            ));
        }

        if !self.ask(
            opts,
            "Restoring a backup will overwrite your current configuration. Continue?",
        ) {
            return Ok(MutationOutcome::Aborted);
        }

        let backup = match self.pre_mutate_backup("pre-restore-", selection, opts)? {
            PreBackup::Aborted => return Ok(MutationOutcome::Aborted),
            outcome => outcome,
        };

        let apply = SnapshotApply::new(self.paths, self.archive, self.settings);
        match apply.apply(backup_archive, selection) {
            Ok(()) => Ok(MutationOutcome::Applied {
                backup: backup.path(),
            }),
            Err(e) => {
                self.report_failed_mutation(&backup);
                Err(e)
            }
        }
    }

    /// Replace a profile's stored snapshot with the current configuration
    ///
    /// The profile's archive path is reused; only its content and timestamp
    /// change. With no name given, the active profile is updated.
    pub fn update(
        &self,
        registry: &mut ProfileRegistry,
        name: Option<&str>,
        selection: &ComponentSelection,
        opts: &MutationOptions,
    ) -> ProfileResult<MutationOutcome> {
        let profile = match name {
            Some(name) => registry
                .find_by_name(name)
                .ok_or_else(|| ProfileError::profile_not_found(name))?,
            None => registry
                .find_active()
                .ok_or_else(|| ProfileError::profile_not_found("(no active profile)"))?,
        }
        .clone();

        if !self.ask(
            opts,
            &format!(
                "Updating '{}' will overwrite its stored snapshot with the current configuration. Continue?",
                profile.name
            ),
        ) {
            return Ok(MutationOutcome::Aborted);
        }

        let backup = match self.pre_mutate_backup(
            &format!("pre-update-{}-", profile.name),
            selection,
            opts,
        )? {
            PreBackup::Aborted => return Ok(MutationOutcome::Aborted),
            outcome => outcome,
        };

        let capture = SnapshotCapture::new(self.paths, self.archive, self.settings);
        match capture.capture(selection, &profile.zip_file) {
            Ok(()) => {
                registry.touch(&profile.name)?;
                Ok(MutationOutcome::Applied {
                    backup: backup.path(),
                })
            }
            Err(e) => {
                self.report_failed_mutation(&backup);
                Err(e)
            }
        }
    }

    fn ask(&self, opts: &MutationOptions, prompt: &str) -> bool {
        opts.assume_yes || self.confirm.confirm(prompt)
    }

    /// Step 2 of the state machine: capture a safety-net backup
    ///
    /// A backup failure is not immediately fatal; the user decides whether
    /// to continue without a safety net.
    fn pre_mutate_backup(
        &self,
        prefix: &str,
        selection: &ComponentSelection,
        opts: &MutationOptions,
    ) -> ProfileResult<PreBackup> {
        if opts.skip_backup {
            log::info!("Automatic backup disabled by flag");
            return Ok(PreBackup::Skipped);
        }

        self.paths.ensure_directories()?;
        let manager = BackupManager::new(self.paths);
        let target = manager.auto_backup_target(prefix);

        let capture = SnapshotCapture::new(self.paths, self.archive, self.settings);
        match capture.capture(selection, &target) {
            Ok(()) => {
                log::info!("Automatic backup created: {}", target.display());
                Ok(PreBackup::Created(target))
            }
            Err(e) => {
                log::warn!("Automatic backup failed: {}", e);
                if self.ask(opts, "The automatic backup failed. Continue without a safety net?") {
                    Ok(PreBackup::Skipped)
                } else {
                    Ok(PreBackup::Aborted)
                }
            }
        }
    }

    /// Step 4's failure branch: always tell the user what can still be
    /// recovered manually
    fn report_failed_mutation(&self, backup: &PreBackup) {
        match backup {
            PreBackup::Created(path) => {
                log::error!(
                    "The operation failed and live configuration may be inconsistent. \
                     An automatic backup is available at {}",
                    path.display()
                );
            }
            _ => {
                log::error!(
                    "The operation failed and live configuration may be inconsistent. \
                     No automatic backup was created before the failure"
                );
            }
        }
    }
}
