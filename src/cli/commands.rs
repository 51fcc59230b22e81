//! Filesystem and configuration command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use vfs_loader::config::Settings;
use vfs_loader::{
    ConfigStore, ConsoleNotifier, FileApi, Loader, MemoryFs, Notifier, NotifyingLoader,
};

/// Application configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Load the saved configuration and print it
    Pull,
    /// Save a JSON configuration file
    Push {
        /// Path to JSON file
        file: PathBuf,
    },
}

/// Build a notifying loader over the file store from settings
///
/// Settings only choose the store. Notifications are always the fixed
/// 5000 ms, non-closable kind.
fn build_loader(
    settings: &Settings,
    fs: MemoryFs,
    config: ConfigStore,
    notifier: Arc<dyn Notifier>,
) -> NotifyingLoader {
    let store_dir = settings.store_dir();
    tracing::debug!("Using store directory: {}", store_dir.display());

    let loader = Loader::new(Arc::new(FileApi::new(store_dir)), Arc::new(fs), config);
    NotifyingLoader::new(loader, notifier)
}

/// Import a host directory and save it as the filesystem snapshot
pub async fn handle_save(settings: &Settings, dir: &Path) -> Result<()> {
    let fs = MemoryFs::new();
    let count = fs
        .import_dir(dir)
        .await
        .with_context(|| format!("Failed to import {}", dir.display()))?;

    tracing::info!("Imported {} file(s) from {}", count, dir.display());

    build_loader(settings, fs, ConfigStore::new(), Arc::new(ConsoleNotifier))
        .save_fs()
        .await
        .context("Failed to save filesystem")?;

    println!("Saved {} file(s)", count);
    Ok(())
}

/// Load the filesystem snapshot and write it out to a host directory
pub async fn handle_load(settings: &Settings, dir: &Path) -> Result<()> {
    let fs = MemoryFs::new();

    build_loader(
        settings,
        fs.clone(),
        ConfigStore::new(),
        Arc::new(ConsoleNotifier),
    )
        .load_fs()
        .await
        .context("Failed to load filesystem")?;

    let count = fs
        .export_dir(dir)
        .await
        .with_context(|| format!("Failed to export to {}", dir.display()))?;

    println!("Restored {} file(s) to {}", count, dir.display());
    Ok(())
}

/// Handle application configuration subcommands
pub async fn handle_config_command(settings: &Settings, cmd: ConfigSubcommand) -> Result<()> {
    let store = ConfigStore::new();
    let loader = build_loader(
        settings,
        MemoryFs::new(),
        store.clone(),
        Arc::new(ConsoleNotifier),
    );

    match cmd {
        ConfigSubcommand::Pull => {
            loader
                .loader()
                .load_cfg()
                .await
                .context("Failed to load configuration")?;

            if let Some(value) = store.get().await {
                let json = serde_json::to_string_pretty(&value)
                    .context("Failed to serialize configuration")?;
                println!("{}", json);
            }
        }
        ConfigSubcommand::Push { file } => {
            let contents = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let value: serde_json::Value = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON from {}", file.display()))?;

            store.set(value).await;
            loader
                .loader()
                .save_cfg()
                .await
                .context("Failed to save configuration")?;

            println!("Configuration saved");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;
    use vfs_loader::Notification;

    #[derive(Default)]
    struct RecordingNotifier {
        created: Mutex<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn create(&self, notification: Notification) {
            self.created.lock().unwrap().push(notification);
        }
    }

    #[tokio::test]
    async fn test_notification_ignores_leftover_settings() {
        let store = tempfile::tempdir().unwrap();
        let yaml = format!(
            "storeDir: {}\nnotification:\n  closable: true\n  durationMs: 10\n",
            store.path().display()
        );
        let settings: Settings = serde_yaml::from_str(&yaml).unwrap();

        let notifier = Arc::new(RecordingNotifier::default());
        let fs = MemoryFs::new();
        fs.write_file("/notes.txt", "hello").await.unwrap();

        build_loader(&settings, fs, ConfigStore::new(), notifier.clone())
            .save_fs()
            .await
            .unwrap();

        let created = notifier.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].title, "Save Success");
        assert_eq!(created[0].duration, Duration::from_millis(5000));
        assert!(!created[0].closable);
        assert!(store.path().join("filesystem.snapshot").exists());
    }
}
