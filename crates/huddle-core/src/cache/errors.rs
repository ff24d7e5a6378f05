use std::path::PathBuf;

use crate::errors::HuddleError;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Event cache at {} is corrupted: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("Failed to serialize event cache: {message}")]
    SerializeFailed { message: String },

    #[error("IO operation on event cache failed: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl HuddleError for CacheError {
    fn error_code(&self) -> &'static str {
        match self {
            CacheError::Corrupt { .. } => "CACHE_CORRUPT",
            CacheError::SerializeFailed { .. } => "CACHE_SERIALIZE_FAILED",
            CacheError::IoError { .. } => "CACHE_IO_ERROR",
        }
    }
}
