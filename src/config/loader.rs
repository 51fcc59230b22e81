//! Settings loading and layering logic
//!
//! Handles loading settings from the settings file and applying environment
//! overrides according to precedence rules.

use super::{defaults, paths, schema::Settings};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding `storeDir`
pub const STORE_DIR_ENV: &str = "VFS_LOADER_STORE_DIR";

/// Settings loader
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings with all layers applied
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root settings file
    /// 3. Built-in defaults
    pub fn load() -> Result<Settings> {
        Self::load_from(&paths::root_config_path())
    }

    /// Load settings using a specific settings file
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load_from(path: &Path) -> Result<Settings> {
        let settings = Self::load_file_or_defaults(path)?;
        Ok(Self::apply_env_overrides(settings))
    }

    /// Load settings from a file
    pub fn load_file(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "Settings file not found: {}",
                path.display()
            ));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        Ok(settings)
    }

    fn load_file_or_defaults(path: &Path) -> Result<Settings> {
        if path.exists() {
            Self::load_file(path)
        } else {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            Ok(Self::load_defaults())
        }
    }

    /// Change one key in a settings file and write it back
    ///
    /// Only the file's own contents are updated. Environment overrides are
    /// not applied, so they never end up persisted. A file that cannot be
    /// read or parsed is left as it is and the error is returned.
    pub fn update_file(path: &Path, key: &str, value: &str) -> Result<Settings> {
        let mut settings = Self::load_file_or_defaults(path)?;

        super::set_settings_value(&mut settings, key, value)
            .with_context(|| format!("Failed to set {} = {}", key, value))?;

        Self::save(&settings, path)?;
        Ok(settings)
    }

    /// Update one key in the root settings file
    pub fn update_root(key: &str, value: &str) -> Result<Settings> {
        Self::update_file(&paths::root_config_path(), key, value)
    }

    /// Validate the settings file
    ///
    /// Checks the file as written, without environment overrides. Fails on
    /// invalid YAML, invalid value types, and a `storeDir` that points at
    /// something other than a directory.
    pub fn validate() -> Result<()> {
        Self::validate_file(&paths::root_config_path())
    }

    pub fn validate_file(path: &Path) -> Result<()> {
        let settings = Self::load_file_or_defaults(path).context("Failed to load settings")?;

        let store_dir = settings.store_dir();
        if store_dir.exists() && !store_dir.is_dir() {
            return Err(anyhow::anyhow!(
                "storeDir is not a directory: {}",
                store_dir.display()
            ));
        }

        Ok(())
    }

    /// Load default settings
    pub fn load_defaults() -> Settings {
        defaults::default_settings()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut settings: Settings) -> Settings {
        if let Ok(dir) = std::env::var(STORE_DIR_ENV) {
            if !dir.is_empty() {
                settings.store_dir = Some(PathBuf::from(dir));
            }
        }

        settings
    }

    /// Save settings to a file
    pub fn save(settings: &Settings, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let yaml =
            serde_yaml::to_string(settings).context("Failed to serialize settings to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsLoader::load_file_or_defaults(&dir.path().join("config.yaml"));
        assert_eq!(settings.unwrap(), Settings::default());
    }

    #[test]
    fn test_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "storeDir: [not, a, path]").unwrap();

        assert!(SettingsLoader::load_from(&path).is_err());
        assert!(SettingsLoader::validate_file(&path).is_err());
    }

    #[test]
    fn test_store_dir_pointing_at_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("store");
        std::fs::write(&store, "not a directory").unwrap();

        let path = dir.path().join("config.yaml");
        std::fs::write(&path, format!("storeDir: {}\n", store.display())).unwrap();

        let err = SettingsLoader::validate_file(&path).unwrap_err();
        assert!(err.to_string().contains("storeDir"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let settings = Settings {
            store_dir: Some(PathBuf::from("/srv/vfs")),
        };

        SettingsLoader::save(&settings, &path).unwrap();
        assert_eq!(SettingsLoader::load_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_update_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let settings = SettingsLoader::update_file(&path, "storeDir", "/srv/vfs").unwrap();
        assert_eq!(settings.store_dir, Some(PathBuf::from("/srv/vfs")));
        assert_eq!(SettingsLoader::load_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_update_leaves_malformed_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let original = "storeDir: [oops\n";
        std::fs::write(&path, original).unwrap();

        assert!(SettingsLoader::update_file(&path, "storeDir", "/srv/vfs").is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_update_unknown_key_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let original = "storeDir: /srv/vfs\n";
        std::fs::write(&path, original).unwrap();

        assert!(SettingsLoader::update_file(&path, "colour", "blue").is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    // The only test touching STORE_DIR_ENV, so no other test observes it.
    #[test]
    fn test_env_override_applied_on_load_but_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "storeDir: /from/file\n").unwrap();

        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        unsafe {
            std::env::set_var(STORE_DIR_ENV, "/from/env");
        }

        let loaded = SettingsLoader::load_from(&path).unwrap();
        let updated = SettingsLoader::update_file(&path, "storeDir", "/from/cli");
        let on_disk = std::fs::read_to_string(&path);

        // SAFETY: see above.
        unsafe {
            std::env::remove_var(STORE_DIR_ENV);
        }

        assert_eq!(loaded.store_dir, Some(PathBuf::from("/from/env")));
        assert_eq!(
            updated.unwrap().store_dir,
            Some(PathBuf::from("/from/cli"))
        );
        let on_disk = on_disk.unwrap();
        assert!(on_disk.contains("/from/cli"));
        assert!(!on_disk.contains("/from/env"));
    }
}
