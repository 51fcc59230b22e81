//! Where vfs-loader keeps its settings file and its data

use directories::ProjectDirs;
use std::path::PathBuf;

/// Overrides the settings directory
pub const CONFIG_DIR_ENV: &str = "VFS_LOADER_CONFIG_DIR";

/// Overrides the data directory (default store, debug logs)
pub const DATA_DIR_ENV: &str = "VFS_LOADER_DATA_DIR";

/// Used when the platform has no home directory to anchor on
const FALLBACK_DIR: &str = ".vfs-loader";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "vfs-loader")
}

fn resolve(env_key: &str, pick: fn(&ProjectDirs) -> PathBuf) -> PathBuf {
    match std::env::var_os(env_key) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => project_dirs()
            .map(|dirs| pick(&dirs))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR)),
    }
}

/// Settings directory, e.g. `~/.config/vfs-loader` on Linux
pub fn config_dir() -> PathBuf {
    resolve(CONFIG_DIR_ENV, |dirs| dirs.config_dir().to_path_buf())
}

/// Data directory, e.g. `~/.local/share/vfs-loader` on Linux
pub fn data_dir() -> PathBuf {
    resolve(DATA_DIR_ENV, |dirs| dirs.data_dir().to_path_buf())
}

pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

/// Store used by the file API client when `storeDir` is unset
pub fn default_store_dir() -> PathBuf {
    data_dir().join("store")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_over_platform_dirs() {
        let dir = resolve("VFS_LOADER_TEST_UNSET_DIR", |_| PathBuf::from("/platform"));
        let expected = project_dirs().map_or(PathBuf::from(FALLBACK_DIR), |_| "/platform".into());
        assert_eq!(dir, expected);

        // SAFETY: set_var is unsafe in Rust 2024; this key is private to this test.
        unsafe {
            std::env::set_var("VFS_LOADER_TEST_SET_DIR", "/custom");
        }
        let dir = resolve("VFS_LOADER_TEST_SET_DIR", |_| PathBuf::from("/platform"));
        assert_eq!(dir, PathBuf::from("/custom"));
    }

    #[test]
    fn test_settings_file_and_store_locations() {
        assert_eq!(root_config_path(), config_dir().join("config.yaml"));
        assert_eq!(default_store_dir(), data_dir().join("store"));
    }
}
