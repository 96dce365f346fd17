//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging clap
//! argument parsing with the core snapshot, registry, and backup logic.

pub mod backup;
pub mod profile;
pub mod prompt;

pub use backup::{handle_backup, handle_list_backups, handle_restore};
pub use profile::{
    handle_create, handle_delete, handle_export, handle_list, handle_switch, handle_update,
};
pub use prompt::TerminalConfirm;

use crate::backup::Confirm;
use crate::config::ProfilePaths;
use crate::external::{ArchiveTool, SettingsTool};

/// Shared collaborators every command handler needs
pub struct CommandContext<'a> {
    pub paths: &'a ProfilePaths,
    pub archive: &'a dyn ArchiveTool,
    pub settings: &'a dyn SettingsTool,
    pub confirm: &'a dyn Confirm,
}
