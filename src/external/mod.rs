//! Adapters for the external tools cinnamon-profiles depends on
//!
//! The archive utility (`zip`/`unzip`) and the dconf dump/load utility are
//! invoked as blocking child processes; their exit code and captured output
//! streams are the only signal of outcome. The adapters sit behind the
//! [`ArchiveTool`] and [`SettingsTool`] traits so capture/apply logic can be
//! tested without the real binaries installed.

pub mod archive;
pub mod dconf;
pub mod tools;

#[cfg(test)]
pub mod fakes;

pub use archive::{ArchiveTool, ZipCommand};
pub use dconf::{DconfCommand, SettingsTool};
pub use tools::check_prerequisites;
