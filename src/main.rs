//! vfs-loader - save and restore a virtual filesystem snapshot
//!
//! Command-line front end over the loader: imports a host directory into the
//! in-memory filesystem and saves it, or loads the saved snapshot back out.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::{ConfigSubcommand, SettingsSubcommand};
use std::path::PathBuf;
use vfs_loader::config::{Settings, SettingsLoader};

/// vfs-loader - save and restore a virtual filesystem snapshot
#[derive(Parser, Debug)]
#[command(name = "vfs-loader")]
#[command(
    about = "Save and restore a virtual filesystem snapshot and configuration",
    long_about = None
)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Store directory (overrides the storeDir setting)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Save a host directory as the filesystem snapshot
    Save {
        /// Directory to import
        dir: PathBuf,
    },
    /// Restore the filesystem snapshot into a host directory
    Load {
        /// Directory to write into
        dir: PathBuf,
    },
    /// Application configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Settings management
    Settings {
        #[command(subcommand)]
        subcommand: SettingsSubcommand,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = cli::init_logging(args.debug)?;
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    match args.command {
        Command::Save { dir } => cli::handle_save(&load_settings(args.store), &dir).await,
        Command::Load { dir } => cli::handle_load(&load_settings(args.store), &dir).await,
        Command::Config { subcommand } => {
            cli::handle_config_command(&load_settings(args.store), subcommand).await
        }
        Command::Settings { subcommand } => cli::handle_settings_command(subcommand),
        Command::Version => {
            cli::display_version();
            Ok(())
        }
    }
}

/// Load settings, falling back to defaults, with the --store override applied
fn load_settings(store: Option<PathBuf>) -> Settings {
    let mut settings = SettingsLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load settings: {:#}, using defaults", e);
        SettingsLoader::load_defaults()
    });
    if let Some(store) = store {
        settings.store_dir = Some(store);
    }
    settings
}
