//! Settings for vfs-loader itself
//!
//! These are the tool's own settings (where the store lives), not the
//! application configuration value the loader moves around. Notification
//! display is fixed and has no setting.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::SettingsLoader;
pub use schema::Settings;

/// Get a settings value by key
pub fn get_settings_value(settings: &Settings, key: &str) -> anyhow::Result<String> {
    match key {
        "storeDir" => Ok(settings.store_dir().display().to_string()),
        _ => Err(anyhow::anyhow!("Unknown settings key: {}", key)),
    }
}

/// Set a settings value by key
///
/// An empty `storeDir` clears the setting so the default applies again.
pub fn set_settings_value(settings: &mut Settings, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "storeDir" => {
            settings.store_dir = if value.is_empty() {
                None
            } else {
                Some(value.into())
            };
        }
        _ => return Err(anyhow::anyhow!("Unknown settings key: {}", key)),
    }

    Ok(())
}
