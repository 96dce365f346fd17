//! Profile export packages
//!
//! An export package is a profile archive's internal structure plus a
//! sidecar metadata document, repacked into a single archive in the user's
//! download directory (or home) for sharing between machines.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use crate::backup::timestamp::file_timestamp;
use crate::config::{ProfilePaths, EXPORT_INFO_FILE};
use crate::error::{ProfileError, ProfileResult};
use crate::external::ArchiveTool;
use crate::models::Profile;

/// Sidecar metadata embedded in every export package
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub app_name: String,
    pub app_version: String,
    pub profile_name: String,
    pub exported_at: DateTime<Utc>,
    pub original_created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Builds export packages from registered profiles
pub struct ProfileExporter<'a> {
    paths: &'a ProfilePaths,
    archive: &'a dyn ArchiveTool,
}

impl<'a> ProfileExporter<'a> {
    pub fn new(paths: &'a ProfilePaths, archive: &'a dyn ArchiveTool) -> Self {
        Self { paths, archive }
    }

    /// Export a profile, returning the path of the written package
    pub fn export(
        &self,
        profile: &Profile,
        description: Option<String>,
    ) -> ProfileResult<PathBuf> {
        let scratch = TempDir::new()
            .map_err(|e| ProfileError::Io(format!("Failed to create scratch area: {}", e)))?;

        self.archive.unpack(&profile.zip_file, scratch.path())?;

        let info = ExportInfo {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            profile_name: profile.name.clone(),
            exported_at: Utc::now(),
            original_created_at: profile.last_modified,
            description,
        };
        let json = serde_json::to_string_pretty(&info)
            .map_err(|e| ProfileError::Json(format!("Failed to serialize export info: {}", e)))?;
        fs::write(scratch.path().join(EXPORT_INFO_FILE), json)
            .map_err(|e| ProfileError::Io(format!("Failed to write export info: {}", e)))?;

        let dest = self.paths.export_dir().join(format!(
            "cinnamon-profile-{}-export-{}.zip",
            profile.name,
            file_timestamp()
        ));
        self.archive.pack(scratch.path(), &dest)?;

        Ok(dest)
    }
}
