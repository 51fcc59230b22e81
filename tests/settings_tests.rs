//! Tests for settings serialization and file updates

use std::path::PathBuf;
use vfs_loader::config::{Settings, SettingsLoader, get_settings_value, set_settings_value};

#[test]
fn test_settings_yaml_round_trip() {
    let settings: Settings = serde_yaml::from_str("storeDir: /srv/vfs\n").unwrap();
    assert_eq!(settings.store_dir, Some(PathBuf::from("/srv/vfs")));

    let yaml = serde_yaml::to_string(&settings).unwrap();
    let reparsed: Settings = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(reparsed, settings);
}

#[test]
fn test_empty_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "{}\n").unwrap();

    let settings = SettingsLoader::load_file(&path).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_set_save_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let mut settings = SettingsLoader::load_defaults();
    set_settings_value(&mut settings, "storeDir", "/srv/vfs").unwrap();
    SettingsLoader::save(&settings, &path).unwrap();

    let reloaded = SettingsLoader::load_file(&path).unwrap();
    assert_eq!(
        get_settings_value(&reloaded, "storeDir").unwrap(),
        PathBuf::from("/srv/vfs").display().to_string()
    );
}

#[test]
fn test_update_file_rejects_broken_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    let broken = "storeDir: [unclosed\n";
    std::fs::write(&path, broken).unwrap();

    assert!(SettingsLoader::update_file(&path, "storeDir", "/elsewhere").is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), broken);
}

#[test]
fn test_load_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    assert!(SettingsLoader::load_file(&dir.path().join("absent.yaml")).is_err());
}
