//! User notifications
//!
//! Notifications are rendered by subscribing a `NotificationSink` to a loader's
//! completion events. The loader itself knows nothing about notifications.

use crate::loader::{EventSink, LoaderEvent};
use std::sync::Arc;
use std::time::Duration;

/// Title shown after the filesystem was loaded
pub const LOAD_SUCCESS_TITLE: &str = "Load Success";

/// Title shown after the filesystem was saved
pub const SAVE_SUCCESS_TITLE: &str = "Save Success";

/// Display duration of every notification
pub const NOTIFICATION_DURATION: Duration = Duration::from_millis(5000);

/// One-shot user notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub duration: Duration,
    pub closable: bool,
}

/// Displays notifications (fire and forget)
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn create(&self, notification: Notification);
}

/// Event subscriber turning filesystem load/save events into notifications
///
/// Notifications always last `NOTIFICATION_DURATION` and cannot be dismissed.
/// Configuration events are ignored.
pub struct NotificationSink {
    notifier: Arc<dyn Notifier>,
}

impl NotificationSink {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Notification for an event, if the event has one
    pub fn notification_for(&self, event: &LoaderEvent) -> Option<Notification> {
        let title = match event {
            LoaderEvent::FilesystemLoaded => LOAD_SUCCESS_TITLE,
            LoaderEvent::FilesystemSaved => SAVE_SUCCESS_TITLE,
            LoaderEvent::ConfigLoaded | LoaderEvent::ConfigSaved => return None,
        };

        Some(Notification {
            title: title.to_string(),
            duration: NOTIFICATION_DURATION,
            closable: false,
        })
    }
}

impl EventSink for NotificationSink {
    fn on_event(&self, event: &LoaderEvent) {
        if let Some(notification) = self.notification_for(event) {
            self.notifier.create(notification);
        }
    }
}

/// Notifier printing to stderr, for command-line use
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn create(&self, notification: Notification) {
        tracing::info!(
            "Notification: {} ({}ms, closable={})",
            notification.title,
            notification.duration.as_millis(),
            notification.closable
        );
        eprintln!("✓ {}", notification.title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink_with(notifier: MockNotifier) -> NotificationSink {
        NotificationSink::new(Arc::new(notifier))
    }

    #[test]
    fn test_filesystem_events_notify() {
        let sink = sink_with(MockNotifier::new());

        let loaded = sink.notification_for(&LoaderEvent::FilesystemLoaded).unwrap();
        assert_eq!(loaded.title, "Load Success");
        assert_eq!(loaded.duration, Duration::from_millis(5000));
        assert!(!loaded.closable);

        let saved = sink.notification_for(&LoaderEvent::FilesystemSaved).unwrap();
        assert_eq!(saved.title, "Save Success");
    }

    #[test]
    fn test_config_events_are_silent() {
        let mut notifier = MockNotifier::new();
        notifier.expect_create().never();
        let sink = sink_with(notifier);

        sink.on_event(&LoaderEvent::ConfigLoaded);
        sink.on_event(&LoaderEvent::ConfigSaved);
    }

    #[test]
    fn test_each_event_creates_one_notification() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_create()
            .withf(|n| n.duration == Duration::from_millis(5000) && !n.closable)
            .times(2)
            .return_const(());

        let sink = sink_with(notifier);
        sink.on_event(&LoaderEvent::FilesystemLoaded);
        sink.on_event(&LoaderEvent::FilesystemSaved);
    }
}
