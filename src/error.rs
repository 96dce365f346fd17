//! Custom error types for cinnamon-profiles
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for cinnamon-profiles operations
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Configuration-related errors (paths, home directory, settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required external tools are missing from PATH
    #[error("Missing required tools: {0}")]
    MissingTools(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors (bad profile names, bad selection input)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The archive tool failed while writing an archive
    #[error("Archive write error: {0}")]
    ArchiveWrite(String),

    /// The archive tool failed while reading an archive
    #[error("Archive read error: {0}")]
    ArchiveRead(String),

    /// A snapshot capture could not be completed
    #[error("Capture failed: {0}")]
    Capture(String),

    /// A snapshot apply could not be completed
    #[error("Apply failed: {0}")]
    Apply(String),

    /// The dconf dump/reset/load tool failed
    ///
    /// Never propagated out of capture/apply; call sites downgrade it to a
    /// warning and continue with degraded fidelity.
    #[error("Settings tool error: {0}")]
    Settings(String),

    /// Invalid backup selection input (non-numeric or out of range)
    #[error("Invalid selection: {0}")]
    Selection(String),
}

impl ProfileError {
    /// Create a "not found" error for profiles
    pub fn profile_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Profile",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Create a "duplicate" error for profiles
    pub fn duplicate_profile(identifier: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: "Profile",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ProfileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for cinnamon-profiles operations
pub type ProfileResult<T> = Result<T, ProfileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProfileError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = ProfileError::profile_not_found("work");
        assert_eq!(err.to_string(), "Profile not found: work");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_error() {
        let err = ProfileError::duplicate_profile("work");
        assert_eq!(err.to_string(), "Profile already exists: work");
    }

    #[test]
    fn test_missing_tools_error() {
        let err = ProfileError::MissingTools("zip, dconf".into());
        assert_eq!(err.to_string(), "Missing required tools: zip, dconf");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let profile_err: ProfileError = io_err.into();
        assert!(matches!(profile_err, ProfileError::Io(_)));
    }
}
