//! External settings adapter wrapping the `dconf` utility
//!
//! All three operations are non-fatal to callers: capture and apply degrade
//! with a warning rather than failing when dconf misbehaves.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::{ProfileError, ProfileResult};

/// Dump, clear, and reload one key-value settings namespace
pub trait SettingsTool {
    /// Dump the namespace to text. An empty dump is a legitimate
    /// "nothing was set" result, not an error.
    fn dump(&self, namespace: &str) -> ProfileResult<String>;

    /// Clear every key under the namespace, so a following load reflects
    /// exactly the captured state rather than a union with what was present.
    fn reset(&self, namespace: &str) -> ProfileResult<()>;

    /// Load the given text into the namespace. Empty or whitespace-only
    /// text skips the load entirely.
    fn load(&self, namespace: &str, text: &str) -> ProfileResult<()>;
}

/// Production settings adapter spawning the `dconf` binary
pub struct DconfCommand;

impl SettingsTool for DconfCommand {
    fn dump(&self, namespace: &str) -> ProfileResult<String> {
        let output = Command::new("dconf")
            .arg("dump")
            .arg(namespace)
            .output()
            .map_err(|e| ProfileError::Settings(format!("Failed to run dconf dump: {}", e)))?;

        if output.status.success() {
            String::from_utf8(output.stdout)
                .map_err(|e| ProfileError::Settings(format!("dconf dump was not UTF-8: {}", e)))
        } else {
            Err(ProfileError::Settings(format!(
                "dconf dump exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    fn reset(&self, namespace: &str) -> ProfileResult<()> {
        let output = Command::new("dconf")
            .arg("reset")
            .arg("-f")
            .arg(namespace)
            .output()
            .map_err(|e| ProfileError::Settings(format!("Failed to run dconf reset: {}", e)))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(ProfileError::Settings(format!(
                "dconf reset exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    fn load(&self, namespace: &str, text: &str) -> ProfileResult<()> {
        if text.trim().is_empty() {
            log::info!("Settings dump is empty; skipping dconf load");
            return Ok(());
        }

        let mut child = Command::new("dconf")
            .arg("load")
            .arg(namespace)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ProfileError::Settings(format!("Failed to run dconf load: {}", e)))?;

        child
            .stdin
            .take()
            .ok_or_else(|| ProfileError::Settings("dconf load stdin unavailable".into()))?
            .write_all(text.as_bytes())
            .map_err(|e| ProfileError::Settings(format!("Failed to stream to dconf load: {}", e)))?;

        let output = child
            .wait_with_output()
            .map_err(|e| ProfileError::Settings(format!("Failed to wait for dconf load: {}", e)))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(ProfileError::Settings(format!(
                "dconf load exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_skips_empty_text_without_spawning() {
        // Whitespace-only text returns Ok before any child process starts,
        // so this passes even where dconf is not installed
        DconfCommand.load("/org/cinnamon/", "").unwrap();
        DconfCommand.load("/org/cinnamon/", "  \n\t").unwrap();
    }
}
