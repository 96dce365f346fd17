//! Backup tier listing, naming, and selection

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::ProfilePaths;
use crate::error::{ProfileError, ProfileResult};

use super::timestamp::{file_timestamp, parse_file_timestamp};

/// Which backup directory an entry lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupTier {
    /// `<root>/backup/`, created explicitly by the user
    Manual,
    /// `<root>/auto-backup/`, created before mutating commands
    Automatic,
}

impl BackupTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automatic => "auto",
        }
    }
}

/// One backup archive, identified purely by filename convention
#[derive(Debug, Clone)]
pub struct BackupEntry {
    pub filename: String,
    pub path: PathBuf,
    pub tier: BackupTier,
    /// Parsed from the filename; `None` sorts last rather than excluding
    /// the entry
    pub created_at: Option<DateTime<Utc>>,
}

/// Lists and names backups across both tiers
pub struct BackupManager<'a> {
    paths: &'a ProfilePaths,
}

impl<'a> BackupManager<'a> {
    pub fn new(paths: &'a ProfilePaths) -> Self {
        Self { paths }
    }

    /// Target path for a new manual backup
    pub fn manual_backup_target(&self) -> PathBuf {
        self.paths
            .backup_dir()
            .join(format!("backup-{}.zip", file_timestamp()))
    }

    /// Target path for a new automatic backup with the given prefix
    ///
    /// The prefix embeds the mutating command and its target, e.g.
    /// `pre-switch-to-work-`.
    pub fn auto_backup_target(&self, prefix: &str) -> PathBuf {
        self.paths
            .auto_backup_dir()
            .join(format!("{}{}.zip", prefix, file_timestamp()))
    }

    /// Enumerate both tiers, newest first
    ///
    /// Entries with unparseable timestamps sort to the end, ordered stably
    /// by filename.
    pub fn list(&self) -> ProfileResult<Vec<BackupEntry>> {
        let mut entries = Vec::new();
        scan_tier(&self.paths.backup_dir(), BackupTier::Manual, &mut entries)?;
        scan_tier(
            &self.paths.auto_backup_dir(),
            BackupTier::Automatic,
            &mut entries,
        )?;

        entries.sort_by(|a, b| match (a.created_at, b.created_at) {
            (Some(a_ts), Some(b_ts)) => b_ts.cmp(&a_ts),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.filename.cmp(&b.filename),
        });

        Ok(entries)
    }

    /// Resolve index-addressable selection input against a listing
    ///
    /// `0` or empty input means cancel. Non-numeric or out-of-range input is
    /// an error with no retry loop; the caller re-invokes the command.
    pub fn select<'b>(
        &self,
        entries: &'b [BackupEntry],
        input: &str,
    ) -> ProfileResult<Option<&'b BackupEntry>> {
        let input = input.trim();
        if input.is_empty() || input == "0" {
            return Ok(None);
        }

        let index: usize = input
            .parse()
            .map_err(|_| ProfileError::Selection(format!("'{}' is not a number", input)))?;
        if index == 0 {
            return Ok(None);
        }

        entries
            .get(index - 1)
            .map(Some)
            .ok_or_else(|| {
                ProfileError::Selection(format!(
                    "{} is out of range (1-{})",
                    index,
                    entries.len()
                ))
            })
    }
}

fn scan_tier(
    dir: &Path,
    tier: BackupTier,
    entries: &mut Vec<BackupEntry>,
) -> ProfileResult<()> {
    if !dir.exists() {
        return Ok(());
    }

    for entry in fs::read_dir(dir)
        .map_err(|e| ProfileError::Io(format!("Failed to read {}: {}", dir.display(), e)))?
    {
        let entry =
            entry.map_err(|e| ProfileError::Io(format!("Failed to read directory entry: {}", e)))?;
        let path = entry.path();
        if path.extension().map_or(true, |ext| ext != "zip") {
            continue;
        }

        let filename = entry.file_name().to_string_lossy().to_string();
        let stem = filename.trim_end_matches(".zip");
        entries.push(BackupEntry {
            created_at: parse_file_timestamp(stem),
            filename,
            path,
            tier,
        });
    }

    Ok(())
}
