use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use cinnamon_profiles::backup::MutationOptions;
use cinnamon_profiles::cli::{
    handle_backup, handle_create, handle_delete, handle_export, handle_list,
    handle_list_backups, handle_restore, handle_switch, handle_update, CommandContext,
    TerminalConfirm,
};
use cinnamon_profiles::config::ProfilePaths;
use cinnamon_profiles::external::{check_prerequisites, DconfCommand, ZipCommand};
use cinnamon_profiles::models::ComponentSelection;
use cinnamon_profiles::registry::ProfileRegistry;

#[derive(Parser)]
#[command(
    name = "cinnamon-profiles",
    version,
    about = "Snapshot manager for Cinnamon desktop configuration profiles",
    long_about = "cinnamon-profiles captures your Cinnamon desktop configuration \
                  (config directories, themes, icons, fonts, and dconf settings) \
                  into named profiles you can switch between. Every destructive \
                  operation takes an automatic backup first."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Component toggles shared by capture and apply commands
#[derive(Args)]
struct ComponentFlags {
    /// Exclude theme directories
    #[arg(long)]
    no_themes: bool,
    /// Exclude icon directories
    #[arg(long)]
    no_icons: bool,
    /// Exclude font directories
    #[arg(long)]
    no_fonts: bool,
    /// Exclude dconf settings
    #[arg(long)]
    no_dconf: bool,
    /// Exclude the ~/.local/share variants of themes/icons/fonts
    #[arg(long)]
    no_local: bool,
}

impl ComponentFlags {
    fn selection(&self) -> ComponentSelection {
        ComponentSelection {
            themes: !self.no_themes,
            icons: !self.no_icons,
            fonts: !self.no_fonts,
            dconf: !self.no_dconf,
            local_share: !self.no_local,
        }
    }
}

/// Flags shared by mutating commands
#[derive(Args)]
struct MutationFlags {
    /// Skip confirmation prompts
    #[arg(short = 'y', long)]
    yes: bool,
    /// Skip the automatic pre-mutation backup
    #[arg(long)]
    skip_backup: bool,
}

impl MutationFlags {
    fn options(&self) -> MutationOptions {
        MutationOptions {
            assume_yes: self.yes,
            skip_backup: self.skip_backup,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Capture the current configuration into a new profile
    Create {
        /// Profile name (letters, digits, hyphen, underscore)
        name: String,
        #[command(flatten)]
        components: ComponentFlags,
    },

    /// List all profiles
    List,

    /// Switch the live configuration to a stored profile
    Switch {
        /// Profile to switch to
        name: String,
        #[command(flatten)]
        components: ComponentFlags,
        #[command(flatten)]
        mutation: MutationFlags,
    },

    /// Overwrite a profile's snapshot with the current configuration
    Update {
        /// Profile to update (defaults to the active profile)
        name: Option<String>,
        #[command(flatten)]
        components: ComponentFlags,
        #[command(flatten)]
        mutation: MutationFlags,
    },

    /// Delete a profile and its archive
    Delete {
        /// Profile to delete
        name: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Write a shareable export package for a profile
    Export {
        /// Profile to export
        name: String,
        /// Free-form description embedded in the package
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Create a manual backup of the current configuration
    Backup {
        #[command(flatten)]
        components: ComponentFlags,
    },

    /// List manual and automatic backups, newest first
    ListBackups,

    /// Restore a backup over the live configuration
    Restore {
        /// Backup number from `list-backups` (interactive when omitted)
        #[arg(short, long)]
        backup: Option<usize>,
        #[command(flatten)]
        components: ComponentFlags,
        #[command(flatten)]
        mutation: MutationFlags,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    // Fatal startup checks: missing tools or an unresolvable home abort
    // before any state is touched
    check_prerequisites()?;
    let paths = ProfilePaths::new()?;
    let mut registry = ProfileRegistry::load(&paths)?;

    let archive = ZipCommand;
    let settings = DconfCommand;
    let confirm = TerminalConfirm;
    let ctx = CommandContext {
        paths: &paths,
        archive: &archive,
        settings: &settings,
        confirm: &confirm,
    };

    match cli.command {
        Commands::Create { name, components } => {
            handle_create(&ctx, &mut registry, &name, &components.selection())?;
        }
        Commands::List => {
            handle_list(&registry)?;
        }
        Commands::Switch {
            name,
            components,
            mutation,
        } => {
            handle_switch(
                &ctx,
                &mut registry,
                &name,
                &components.selection(),
                &mutation.options(),
            )?;
        }
        Commands::Update {
            name,
            components,
            mutation,
        } => {
            handle_update(
                &ctx,
                &mut registry,
                name.as_deref(),
                &components.selection(),
                &mutation.options(),
            )?;
        }
        Commands::Delete { name, yes } => {
            handle_delete(&ctx, &mut registry, &name, yes)?;
        }
        Commands::Export { name, description } => {
            handle_export(&ctx, &registry, &name, description)?;
        }
        Commands::Backup { components } => {
            handle_backup(&ctx, &components.selection())?;
        }
        Commands::ListBackups => {
            handle_list_backups(&ctx)?;
        }
        Commands::Restore {
            backup,
            components,
            mutation,
        } => {
            handle_restore(&ctx, backup, &components.selection(), &mutation.options())?;
        }
    }

    Ok(())
}
