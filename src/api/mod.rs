//! API client abstraction
//!
//! The persistence service the loader talks to. Implementations may be remote
//! or local; the loader only relies on this trait.

mod file;

pub use file::FileApi;

use crate::archive::ArchiveBlob;
use crate::store::ConfigValue;
use anyhow::Result;
use async_trait::async_trait;

/// Persistence service for filesystem archives and the configuration value
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetch the most recently saved archive
    async fn load(&self) -> Result<ArchiveBlob>;

    /// Persist an archive, replacing the previous one
    async fn save(&self, archive: ArchiveBlob) -> Result<()>;

    /// Fetch the saved configuration value
    async fn load_config(&self) -> Result<ConfigValue>;

    /// Persist a configuration value
    async fn save_config(&self, config: ConfigValue) -> Result<()>;
}
