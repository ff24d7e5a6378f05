use crate::cache::CacheError;
use crate::errors::HuddleError;
use crate::jobs::JobError;
use crate::source::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Failed to fetch events: {0}")]
    Source(#[from] SourceError),

    #[error("Failed to store events: {0}")]
    Cache(#[from] CacheError),

    #[error("Failed to start background reload: {0}")]
    Job(#[from] JobError),
}

impl HuddleError for RefreshError {
    fn error_code(&self) -> &'static str {
        match self {
            RefreshError::Source(e) => e.error_code(),
            RefreshError::Cache(e) => e.error_code(),
            RefreshError::Job(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            RefreshError::Source(e) => e.is_user_error(),
            RefreshError::Cache(e) => e.is_user_error(),
            RefreshError::Job(e) => e.is_user_error(),
        }
    }
}
