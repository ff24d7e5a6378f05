use crate::errors::HuddleError;

/// A fetch that could not complete.
///
/// Errors the data source itself reports travel inside
/// [`Dataset::error`](crate::types::Dataset) instead.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to run '{program}': {message}")]
    SpawnFailed { program: String, message: String },

    #[error("'{program}' exited with status {code}: {stderr}")]
    ExitStatus {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("Invalid event payload: {message}")]
    InvalidPayload { message: String },

    #[error("Invalid date '{value}' in event '{title}'")]
    InvalidDate { title: String, value: String },
}

impl HuddleError for SourceError {
    fn error_code(&self) -> &'static str {
        match self {
            SourceError::SpawnFailed { .. } => "SOURCE_SPAWN_FAILED",
            SourceError::ExitStatus { .. } => "SOURCE_EXIT_STATUS",
            SourceError::InvalidPayload { .. } => "SOURCE_INVALID_PAYLOAD",
            SourceError::InvalidDate { .. } => "SOURCE_INVALID_DATE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, SourceError::SpawnFailed { .. })
    }
}
