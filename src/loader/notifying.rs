//! Loader variant that notifies the user after filesystem load/save

use super::{Loader, LoaderResult};
use crate::notify::{NotificationSink, Notifier};
use std::sync::Arc;

/// Wraps `load_fs`/`save_fs` with a success notification
///
/// Exactly one notification is created per successful call, shown for 5000 ms
/// and not dismissible. Failed calls create none and return the error
/// unchanged.
pub struct NotifyingLoader {
    loader: Loader,
}

impl NotifyingLoader {
    pub fn new(loader: Loader, notifier: Arc<dyn Notifier>) -> Self {
        let sink = Arc::new(NotificationSink::new(notifier));
        Self {
            loader: loader.with_observer(sink),
        }
    }

    pub async fn load_fs(&self) -> LoaderResult<()> {
        self.loader.load_fs().await
    }

    pub async fn save_fs(&self) -> LoaderResult<()> {
        self.loader.save_fs().await
    }

    /// The wrapped loader, for configuration operations
    pub fn loader(&self) -> &Loader {
        &self.loader
    }
}
