//! Desktop notifications.
//!
//! Best-effort: failures are logged and never propagate. Used by
//! `huddle reload --notify` to announce that the event cache was refreshed.

pub mod errors;
pub mod registry;

pub use errors::NotifyError;
pub use registry::{NotificationBackend, NotifySend, Osascript};

use tracing::{info, warn};

/// Receives refresh completion notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// Title used for every huddle notification.
pub const NOTIFICATION_TITLE: &str = "Video Conferences";

/// Send a desktop notification through the first available backend.
pub fn send_notification(title: &str, message: &str) {
    info!(
        event = "core.notify.send_started",
        title = title,
        message = message,
    );

    match registry::send_via_backend(title, message) {
        Ok(true) => {
            info!(event = "core.notify.send_completed", title = title);
        }
        Ok(false) => {}
        Err(e) => {
            warn!(
                event = "core.notify.send_failed",
                title = title,
                error = %e,
            );
        }
    }
}

/// [`Notifier`] that delivers through the platform backends.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str) {
        send_notification(title, message);
    }
}

/// Message shown when a reload finishes.
pub fn format_reload_message(events: usize, error: Option<&str>) -> String {
    match error {
        Some(error) => format!("Reload failed: {}", error),
        None if events == 1 => "Loaded 1 calendar event".to_string(),
        None => format!("Loaded {} calendar events", events),
    }
}
