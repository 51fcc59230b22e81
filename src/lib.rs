//! vfs-loader library
//!
//! Loads and saves a virtual filesystem archive and a shared configuration
//! value through a pluggable API client, and notifies the user when a
//! filesystem load or save succeeds.
//!
//! - `api`: persistence service trait and a directory-backed client
//! - `filesystem`: archive adapter trait and an in-memory filesystem
//! - `store`: the shared configuration slot
//! - `loader`: the orchestration operations
//! - `notify`: notifications rendered from loader events
//! - `config`: settings for the tool itself

pub mod api;
pub mod archive;
pub mod config;
pub mod filesystem;
pub mod loader;
pub mod notify;
pub mod store;

// Re-export commonly used types for convenience
pub use api::{ApiClient, FileApi};
pub use archive::ArchiveBlob;
pub use filesystem::{FilesystemAdapter, MemoryFs};
pub use loader::{EventSink, Loader, LoaderError, LoaderEvent, LoaderResult, NotifyingLoader};
pub use notify::{ConsoleNotifier, Notification, NotificationSink, Notifier};
pub use store::{ConfigStore, ConfigValue};
