use tracing::info;

/// Log the start of a CLI invocation with the binary version.
pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
    );
}

/// Log a failure that is about to be reported to the user.
pub fn log_app_error(error: &dyn std::error::Error) {
    tracing::error!(event = "core.app.error_occurred", error = %error);
}
