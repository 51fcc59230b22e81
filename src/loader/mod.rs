//! Loader orchestration
//!
//! Sequences one API call with one filesystem or configuration step. Each
//! operation is a linear chain: the second step only starts after the first
//! succeeded, and any failure is returned to the caller as-is. Nothing is
//! retried or rolled back here.

mod events;
mod notifying;

pub use events::{EventSink, LoaderEvent};
pub use notifying::NotifyingLoader;

use crate::api::ApiClient;
use crate::filesystem::FilesystemAdapter;
use crate::store::ConfigStore;
use std::sync::Arc;

/// Loader errors
///
/// Both variants carry the collaborator's error unmodified; `Display` and
/// `source()` are forwarded to it.
#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    /// Network or storage failure from the API client
    #[error(transparent)]
    Api(anyhow::Error),

    /// Packing or unpacking failure from the filesystem adapter
    #[error(transparent)]
    Filesystem(anyhow::Error),
}

impl LoaderError {
    /// The collaborator error
    pub fn into_inner(self) -> anyhow::Error {
        match self {
            LoaderError::Api(err) | LoaderError::Filesystem(err) => err,
        }
    }
}

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Loads and saves the virtual filesystem and the configuration value
pub struct Loader {
    api: Arc<dyn ApiClient>,
    fs: Arc<dyn FilesystemAdapter>,
    config: ConfigStore,
    observers: Vec<Arc<dyn EventSink>>,
}

impl Loader {
    pub fn new(
        api: Arc<dyn ApiClient>,
        fs: Arc<dyn FilesystemAdapter>,
        config: ConfigStore,
    ) -> Self {
        Self {
            api,
            fs,
            config,
            observers: Vec::new(),
        }
    }

    /// Register an observer for completion events
    pub fn with_observer(mut self, observer: Arc<dyn EventSink>) -> Self {
        self.observers.push(observer);
        self
    }

    /// The configuration slot this loader reads and writes
    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Fetch the saved archive and replace the filesystem with it
    pub async fn load_fs(&self) -> LoaderResult<()> {
        tracing::debug!("Loading filesystem archive");
        let archive = self.api.load().await.map_err(LoaderError::Api)?;

        tracing::debug!("Unpacking {:?}", archive);
        self.fs
            .load_archive(archive)
            .await
            .map_err(LoaderError::Filesystem)?;

        tracing::info!("Filesystem loaded");
        self.emit(LoaderEvent::FilesystemLoaded);
        Ok(())
    }

    /// Pack the filesystem and persist the archive
    pub async fn save_fs(&self) -> LoaderResult<()> {
        tracing::debug!("Packing filesystem");
        let archive = self
            .fs
            .save_archive()
            .await
            .map_err(LoaderError::Filesystem)?;

        tracing::debug!("Saving {:?}", archive);
        self.api.save(archive).await.map_err(LoaderError::Api)?;

        tracing::info!("Filesystem saved");
        self.emit(LoaderEvent::FilesystemSaved);
        Ok(())
    }

    /// Fetch the saved configuration and overwrite the configuration slot
    ///
    /// The previous value is discarded, not merged. On failure the slot is
    /// left untouched.
    pub async fn load_cfg(&self) -> LoaderResult<()> {
        tracing::debug!("Loading configuration");
        let value = self.api.load_config().await.map_err(LoaderError::Api)?;

        self.config.set(value).await;

        tracing::info!("Configuration loaded");
        self.emit(LoaderEvent::ConfigLoaded);
        Ok(())
    }

    /// Persist the configuration slot, if it holds a value
    ///
    /// An empty slot is not an error: nothing is sent and no event is emitted.
    pub async fn save_cfg(&self) -> LoaderResult<()> {
        let Some(value) = self.config.get().await else {
            tracing::debug!("No configuration set, skipping save");
            return Ok(());
        };

        tracing::debug!("Saving configuration");
        self.api.save_config(value).await.map_err(LoaderError::Api)?;

        tracing::info!("Configuration saved");
        self.emit(LoaderEvent::ConfigSaved);
        Ok(())
    }

    fn emit(&self, event: LoaderEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }
}
