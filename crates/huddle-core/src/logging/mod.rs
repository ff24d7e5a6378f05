//! Structured logging setup.
//!
//! Logs are JSON lines on stderr so stdout stays reserved for the feedback
//! the interactive UI parses.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Initialize the global tracing subscriber.
///
/// In quiet mode every level is suppressed unless `RUST_LOG` asks for
/// something explicitly. Verbose mode defaults to `info`.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logging(quiet: bool) {
    let default_directive = if quiet { "off" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
