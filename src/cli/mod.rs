//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod logging;
mod settings;
mod version;

pub use commands::{ConfigSubcommand, handle_config_command, handle_load, handle_save};
pub use logging::*;
pub use settings::{SettingsSubcommand, handle_settings_command};
pub use version::display_version;
