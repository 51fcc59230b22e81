//! Loader completion events

/// Emitted after a loader operation completes successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderEvent {
    /// The filesystem was replaced with the saved archive
    FilesystemLoaded,
    /// The current filesystem was persisted
    FilesystemSaved,
    /// The configuration slot was overwritten with the saved value
    ConfigLoaded,
    /// The configuration value was persisted
    ConfigSaved,
}

/// Observer of loader events
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: &LoaderEvent);
}
