//! Settings command handlers

use anyhow::{Context, Result};
use clap::Subcommand;

use vfs_loader::config::{self, SettingsLoader, paths};

/// Settings management subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsSubcommand {
    /// Get settings value
    Get {
        /// Settings key (e.g., "storeDir")
        key: Option<String>,
    },
    /// Set settings value
    Set {
        /// Settings key (e.g., "storeDir")
        key: String,
        /// Settings value
        value: String,
    },
    /// List all settings
    List,
    /// Show settings file path
    Path,
    /// Validate settings
    Validate,
}

/// Handle settings subcommands
pub fn handle_settings_command(cmd: SettingsSubcommand) -> Result<()> {
    match cmd {
        SettingsSubcommand::Get { key } => {
            let settings = SettingsLoader::load().context("Failed to load settings")?;

            if let Some(key) = key {
                let value = config::get_settings_value(&settings, &key)?;
                println!("{}", value);
            } else {
                let yaml =
                    serde_yaml::to_string(&settings).context("Failed to serialize settings")?;
                print!("{}", yaml);
            }
        }
        SettingsSubcommand::Set { key, value } => {
            // Reads the file alone: a broken file is reported rather than
            // replaced, and env overrides stay out of it.
            SettingsLoader::update_root(&key, &value).with_context(|| {
                format!(
                    "Failed to update {}",
                    paths::root_config_path().display()
                )
            })?;
            println!("Settings saved");
        }
        SettingsSubcommand::List => {
            let settings = SettingsLoader::load().context("Failed to load settings")?;
            let yaml = serde_yaml::to_string(&settings).context("Failed to serialize settings")?;
            print!("{}", yaml);
            println!("# effective storeDir: {}", settings.store_dir().display());
        }
        SettingsSubcommand::Path => {
            println!("{}", paths::root_config_path().display());
        }
        SettingsSubcommand::Validate => match SettingsLoader::validate() {
            Ok(()) => println!("Settings are valid"),
            Err(e) => {
                eprintln!("Settings validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
