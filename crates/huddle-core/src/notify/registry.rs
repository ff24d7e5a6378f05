//! Platform notification tools, tried in order.

use std::process::Command;
use std::sync::LazyLock;

use tracing::debug;

use super::errors::NotifyError;

/// A command-line tool that can post a desktop notification.
pub trait NotificationBackend: Send + Sync {
    /// Executable looked up on `PATH`.
    fn tool(&self) -> &'static str;

    /// Whether the tool exists on this platform at all.
    fn supported(&self) -> bool;

    fn args(&self, title: &str, message: &str) -> Vec<String>;

    fn is_available(&self) -> bool {
        self.supported() && which::which(self.tool()).is_ok()
    }

    fn send(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let tool = self.tool();
        let output = Command::new(tool)
            .args(self.args(title, message))
            .output()
            .map_err(|source| NotifyError::Spawn { tool, source })?;

        if output.status.success() {
            return Ok(());
        }
        Err(NotifyError::Exit {
            tool,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// `osascript -e 'display notification ...'` on macOS.
pub struct Osascript;

impl NotificationBackend for Osascript {
    fn tool(&self) -> &'static str {
        "osascript"
    }

    fn supported(&self) -> bool {
        cfg!(target_os = "macos")
    }

    fn args(&self, title: &str, message: &str) -> Vec<String> {
        let script = format!(
            "display notification {} with title {}",
            applescript_string(message),
            applescript_string(title)
        );
        vec!["-e".to_string(), script]
    }
}

/// Quote a string as an AppleScript literal.
fn applescript_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// libnotify's `notify-send` on Linux.
pub struct NotifySend;

impl NotificationBackend for NotifySend {
    fn tool(&self) -> &'static str {
        "notify-send"
    }

    fn supported(&self) -> bool {
        cfg!(target_os = "linux")
    }

    fn args(&self, title: &str, message: &str) -> Vec<String> {
        vec![
            "--app-name=huddle".to_string(),
            title.to_string(),
            message.to_string(),
        ]
    }
}

static BACKENDS: LazyLock<Vec<Box<dyn NotificationBackend>>> =
    LazyLock::new(|| vec![Box::new(Osascript), Box::new(NotifySend)]);

fn first_available(
    backends: &[Box<dyn NotificationBackend>],
) -> Option<&dyn NotificationBackend> {
    backends
        .iter()
        .find(|b| b.is_available())
        .map(|b| b.as_ref())
}

/// Post through the first available tool. `Ok(false)` when there is none.
pub fn send_via_backend(title: &str, message: &str) -> Result<bool, NotifyError> {
    let Some(backend) = first_available(&BACKENDS) else {
        debug!(
            event = "core.notify.send_skipped",
            reason = "no notification tool available",
        );
        return Ok(false);
    };

    debug!(event = "core.notify.backend_selected", tool = backend.tool());
    backend.send(title, message)?;
    Ok(true)
}
