//! The Profile model
//!
//! A profile is a named, registered snapshot of configuration state. The
//! registry enforces that names are unique and at most one profile is active
//! at any time.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};

/// A named, registered configuration snapshot
///
/// Serialized into `profiles.json` with camelCase field names:
/// `{name, active, lastModified, zipFile}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique, sanitized profile name
    pub name: String,
    /// Whether this profile is the active one
    pub active: bool,
    /// Updated on creation and on every successful apply/update
    pub last_modified: DateTime<Utc>,
    /// Absolute path to the profile's archive; owned by this entry
    pub zip_file: PathBuf,
}

impl Profile {
    /// Create a new profile record (active, timestamped now)
    pub fn new(name: impl Into<String>, zip_file: PathBuf) -> Self {
        Self {
            name: name.into(),
            active: true,
            last_modified: Utc::now(),
            zip_file,
        }
    }
}

/// Sanitize a user-chosen profile name to the restricted character set
///
/// Letters, digits, hyphen and underscore pass through; every other
/// character is replaced with a hyphen. A name that sanitizes to nothing
/// but hyphens is rejected.
pub fn sanitize_profile_name(raw: &str) -> ProfileResult<String> {
    let sanitized: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    if sanitized.is_empty() || sanitized.chars().all(|c| c == '-') {
        return Err(ProfileError::Validation(format!(
            "Profile name '{}' contains no usable characters",
            raw
        )));
    }

    Ok(sanitized)
}
