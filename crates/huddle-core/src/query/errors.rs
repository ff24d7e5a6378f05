use crate::cache::CacheError;
use crate::errors::HuddleError;
use crate::refresh::RefreshError;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Refresh(#[from] RefreshError),
}

impl HuddleError for QueryError {
    fn error_code(&self) -> &'static str {
        match self {
            QueryError::Cache(e) => e.error_code(),
            QueryError::Refresh(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            QueryError::Cache(e) => e.is_user_error(),
            QueryError::Refresh(e) => e.is_user_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_error_code_passes_through() {
        let error = QueryError::from(CacheError::Corrupt {
            path: "/data/events.json".into(),
            message: "expected value".to_string(),
        });
        assert_eq!(error.error_code(), "CACHE_CORRUPT");
        assert!(!error.is_user_error());
    }
}
