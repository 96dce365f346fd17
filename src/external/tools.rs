//! Prerequisite tool checks
//!
//! Every command requires the external archive and dconf utilities; their
//! absence is a fatal startup error naming all missing tools at once.

use which::which;

use crate::error::{ProfileError, ProfileResult};

/// External binaries that must be on PATH before any command runs
pub const REQUIRED_TOOLS: [&str; 3] = ["zip", "unzip", "dconf"];

/// Verify that every required tool is installed
///
/// # Errors
///
/// Returns [`ProfileError::MissingTools`] naming every missing tool.
pub fn check_prerequisites() -> ProfileResult<()> {
    let missing: Vec<&str> = REQUIRED_TOOLS
        .iter()
        .filter(|tool| which(tool).is_err())
        .copied()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ProfileError::MissingTools(missing.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_finds_shell() {
        // `sh` is present on every platform these tests run on
        assert!(which("sh").is_ok());
    }

    #[test]
    fn test_lookup_rejects_unknown_tool() {
        assert!(which("definitely-not-a-real-tool-1b2c3d").is_err());
    }
}
