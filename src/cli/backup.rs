//! Backup CLI commands

use crate::backup::{BackupEntry, BackupManager, BackupOrchestrator, MutationOptions, MutationOutcome};
use crate::error::ProfileResult;
use crate::models::ComponentSelection;
use crate::snapshot::SnapshotCapture;

use super::prompt::read_selection;
use super::CommandContext;

/// Create a manual-tier backup of the current configuration
pub fn handle_backup(ctx: &CommandContext, selection: &ComponentSelection) -> ProfileResult<()> {
    ctx.paths.ensure_directories()?;
    let target = BackupManager::new(ctx.paths).manual_backup_target();

    println!("Creating backup...");
    SnapshotCapture::new(ctx.paths, ctx.archive, ctx.settings).capture(selection, &target)?;

    println!(
        "Backup created: {}",
        target.file_name().unwrap_or_default().to_string_lossy()
    );
    println!("Location: {}", target.display());
    Ok(())
}

/// List backups from both tiers, newest first
pub fn handle_list_backups(ctx: &CommandContext) -> ProfileResult<()> {
    let entries = BackupManager::new(ctx.paths).list()?;

    if entries.is_empty() {
        println!("No backups found.");
        println!("Create one with: cinnamon-profiles backup");
        return Ok(());
    }

    print_backup_listing(&entries);
    Ok(())
}

/// Restore a backup, selected by flag or interactively
pub fn handle_restore(
    ctx: &CommandContext,
    backup_index: Option<usize>,
    selection: &ComponentSelection,
    opts: &MutationOptions,
) -> ProfileResult<()> {
    let manager = BackupManager::new(ctx.paths);
    let entries = manager.list()?;

    if entries.is_empty() {
        println!("No backups available to restore.");
        return Ok(());
    }

    let chosen = match backup_index {
        Some(index) => manager.select(&entries, &index.to_string())?,
        None => {
            print_backup_listing(&entries);
            let input = read_selection("Select a backup to restore (0 to cancel): ");
            manager.select(&entries, &input)?
        }
    };

    let Some(entry) = chosen else {
        println!("Cancelled.");
        return Ok(());
    };

    let orchestrator =
        BackupOrchestrator::new(ctx.paths, ctx.archive, ctx.settings, ctx.confirm);
    match orchestrator.restore(&entry.path, selection, opts)? {
        MutationOutcome::Applied { backup } => {
            println!("Restored backup '{}'.", entry.filename);
            match backup {
                Some(path) => println!("Pre-restore backup: {}", path.display()),
                None => println!("No pre-restore backup was created."),
            }
        }
        MutationOutcome::Aborted => println!("Aborted; nothing was changed."),
    }
    Ok(())
}

fn print_backup_listing(entries: &[BackupEntry]) {
    println!("Available Backups");
    println!("=================");
    for (i, entry) in entries.iter().enumerate() {
        let created = entry
            .created_at
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        println!(
            "  {}. [{}] {} ({})",
            i + 1,
            entry.tier.label(),
            entry.filename,
            created
        );
    }
    println!();
    println!("Total: {} backup(s)", entries.len());
}
