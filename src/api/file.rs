//! Directory-backed API client

use super::ApiClient;
use crate::archive::ArchiveBlob;
use crate::store::ConfigValue;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Archive file name inside the store directory
pub const SNAPSHOT_FILE: &str = "filesystem.snapshot";

/// Configuration file name inside the store directory
pub const CONFIG_FILE: &str = "config.json";

/// API client persisting to a local directory
///
/// Keeps one archive and one configuration document. Used by the CLI and
/// for testing without a remote service.
pub struct FileApi {
    root: PathBuf,
}

impl FileApi {
    /// Create a new directory-backed client
    ///
    /// The directory is created lazily on the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();

        tracing::debug!("Created File API client: {:?}", root);

        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn snapshot_path(&self) -> PathBuf {
        self.root.join(SNAPSHOT_FILE)
    }

    fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    async fn ensure_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create store directory: {:?}", self.root))
    }
}

#[async_trait]
impl ApiClient for FileApi {
    async fn load(&self) -> Result<ArchiveBlob> {
        let path = self.snapshot_path();
        tracing::debug!("Reading archive from: {:?}", path);

        let exists = tokio::fs::try_exists(&path)
            .await
            .with_context(|| format!("Failed to check for archive: {:?}", path))?;
        if !exists {
            anyhow::bail!("No saved filesystem found in store: {:?}", self.root);
        }

        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read archive: {:?}", path))?;

        tracing::debug!("Read archive ({} bytes) from: {:?}", bytes.len(), path);

        Ok(ArchiveBlob::new(bytes))
    }

    async fn save(&self, archive: ArchiveBlob) -> Result<()> {
        self.ensure_root().await?;

        let path = self.snapshot_path();
        tracing::debug!("Writing archive ({} bytes) to: {:?}", archive.len(), path);

        tokio::fs::write(&path, archive.as_bytes())
            .await
            .with_context(|| format!("Failed to write archive: {:?}", path))
    }

    async fn load_config(&self) -> Result<ConfigValue> {
        let path = self.config_path();
        tracing::debug!("Reading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read configuration: {:?}", path))?;

        let config: ConfigValue = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from file: {:?}", path))?;

        Ok(config)
    }

    async fn save_config(&self, config: ConfigValue) -> Result<()> {
        self.ensure_root().await?;

        let path = self.config_path();
        tracing::debug!("Writing configuration to: {:?}", path);

        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?;

        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write configuration: {:?}", path))
    }
}
