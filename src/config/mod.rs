//! Configuration and path management for cinnamon-profiles

pub mod paths;

pub use paths::ProfilePaths;

/// The dconf namespace this tool captures and restores
pub const DCONF_NAMESPACE: &str = "/org/cinnamon/";

/// Well-known filename for the dconf dump inside a profile archive
pub const DCONF_DUMP_FILE: &str = "cinnamon-settings.dconf";

/// Sidecar metadata filename inside an export package
pub const EXPORT_INFO_FILE: &str = "export-info.json";
