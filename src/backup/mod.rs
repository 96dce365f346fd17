//! Backup tiers and the capture-before-mutate orchestration
//!
//! Backups live in two directories distinguished only by location and
//! filename prefix: `backup/` for manual backups and `auto-backup/` for the
//! automatic pre-mutation safety net. Entries carry no persisted metadata
//! beyond the timestamp embedded in their filename.
//!
//! The orchestrator sequences every mutating command the same way:
//! confirm, capture a pre-mutation backup, apply, then commit registry state
//! or report what backup exists for manual recovery.

pub mod manager;
pub mod orchestrator;
pub mod timestamp;

pub use manager::{BackupEntry, BackupManager, BackupTier};
pub use orchestrator::{
    BackupOrchestrator, Confirm, MutationOptions, MutationOutcome,
};
