//! Profile CLI commands

use std::fs;

use crate::backup::{BackupOrchestrator, MutationOptions, MutationOutcome};
use crate::error::{ProfileError, ProfileResult};
use crate::models::{sanitize_profile_name, ComponentSelection};
use crate::registry::ProfileRegistry;
use crate::snapshot::{ProfileExporter, SnapshotCapture};

use super::CommandContext;

/// Capture the current configuration into a new profile
pub fn handle_create(
    ctx: &CommandContext,
    registry: &mut ProfileRegistry,
    name: &str,
    selection: &ComponentSelection,
) -> ProfileResult<()> {
    let name = sanitize_profile_name(name)?;
    if registry.find_by_name(&name).is_some() {
        return Err(ProfileError::duplicate_profile(name));
    }

    ctx.paths.ensure_directories()?;
    let zip_file = ctx.paths.new_profile_archive(&name);

    println!("Capturing current configuration...");
    SnapshotCapture::new(ctx.paths, ctx.archive, ctx.settings).capture(selection, &zip_file)?;

    // A failed registry commit must not leave the fresh archive orphaned
    if let Err(e) = registry.create(&name, zip_file.clone()) {
        if let Err(cleanup_err) = fs::remove_file(&zip_file) {
            log::warn!(
                "Could not remove unregistered archive {}: {}",
                zip_file.display(),
                cleanup_err
            );
        }
        return Err(e);
    }

    println!("Profile '{}' created and set active.", name);
    Ok(())
}

/// List all registered profiles
pub fn handle_list(registry: &ProfileRegistry) -> ProfileResult<()> {
    if registry.list().is_empty() {
        println!("No profiles yet.");
        println!("Create one with: cinnamon-profiles create <name>");
        return Ok(());
    }

    println!("Profiles");
    println!("========");
    for profile in registry.list() {
        let marker = if profile.active { "*" } else { " " };
        println!(
            "{} {}  (modified {})",
            marker,
            profile.name,
            profile.last_modified.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    println!();
    println!("* = active profile");
    Ok(())
}

/// Switch the live configuration to a stored profile
pub fn handle_switch(
    ctx: &CommandContext,
    registry: &mut ProfileRegistry,
    name: &str,
    selection: &ComponentSelection,
    opts: &MutationOptions,
) -> ProfileResult<()> {
    let orchestrator =
        BackupOrchestrator::new(ctx.paths, ctx.archive, ctx.settings, ctx.confirm);

    match orchestrator.switch(registry, name, selection, opts)? {
        MutationOutcome::Applied { backup } => {
            println!("Switched to profile '{}'.", name);
            report_backup(backup);
        }
        MutationOutcome::Aborted => println!("Aborted; nothing was changed."),
    }
    Ok(())
}

/// Overwrite a profile's snapshot with the current configuration
pub fn handle_update(
    ctx: &CommandContext,
    registry: &mut ProfileRegistry,
    name: Option<&str>,
    selection: &ComponentSelection,
    opts: &MutationOptions,
) -> ProfileResult<()> {
    let orchestrator =
        BackupOrchestrator::new(ctx.paths, ctx.archive, ctx.settings, ctx.confirm);

    match orchestrator.update(registry, name, selection, opts)? {
        MutationOutcome::Applied { backup } => {
            println!("Profile updated.");
            report_backup(backup);
        }
        MutationOutcome::Aborted => println!("Aborted; nothing was changed."),
    }
    Ok(())
}

/// Delete a profile and its archive
pub fn handle_delete(
    ctx: &CommandContext,
    registry: &mut ProfileRegistry,
    name: &str,
    assume_yes: bool,
) -> ProfileResult<()> {
    if registry.find_by_name(name).is_none() {
        return Err(ProfileError::profile_not_found(name));
    }

    let prompt = format!("Delete profile '{}' and its archive?", name);
    if !assume_yes && !ctx.confirm.confirm(&prompt) {
        println!("Aborted; nothing was changed.");
        return Ok(());
    }

    registry.remove(name)?;
    println!("Profile '{}' deleted.", name);
    Ok(())
}

/// Write an export package for a profile
pub fn handle_export(
    ctx: &CommandContext,
    registry: &ProfileRegistry,
    name: &str,
    description: Option<String>,
) -> ProfileResult<()> {
    let profile = registry
        .find_by_name(name)
        .ok_or_else(|| ProfileError::profile_not_found(name))?;

    let exporter = ProfileExporter::new(ctx.paths, ctx.archive);
    let dest = exporter.export(profile, description)?;

    println!("Profile '{}' exported to {}", name, dest.display());
    Ok(())
}

fn report_backup(backup: Option<std::path::PathBuf>) {
    match backup {
        Some(path) => println!("Automatic backup: {}", path.display()),
        None => println!("No automatic backup was created for this operation."),
    }
}
