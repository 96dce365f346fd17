//! Snapshot capture and apply
//!
//! Capture stages a sanitized copy of every enabled source location plus the
//! dconf dump into a scratch directory and packs it into one archive. Apply
//! is the inverse: extract to scratch first (so a corrupt archive never
//! touches live state), wipe the core configuration directories, restore the
//! captured subtrees, and reload the settings namespace.
//!
//! Scratch directories are scoped resources (`tempfile::TempDir`), reclaimed
//! on every exit path.

pub mod apply;
pub mod capture;
pub mod export;
mod fs_util;

pub use apply::SnapshotApply;
pub use capture::SnapshotCapture;
pub use export::{ExportInfo, ProfileExporter};
