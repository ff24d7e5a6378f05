use crate::errors::HuddleError;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Could not run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    Exit {
        tool: &'static str,
        status: String,
        stderr: String,
    },
}

impl HuddleError for NotifyError {
    fn error_code(&self) -> &'static str {
        match self {
            NotifyError::Spawn { .. } => "NOTIFY_SPAWN_FAILED",
            NotifyError::Exit { .. } => "NOTIFY_EXIT_FAILED",
        }
    }
}
