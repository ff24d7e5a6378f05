use std::path::PathBuf;

use crate::errors::HuddleError;

#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("No icon template configured")]
    NoTemplate,

    #[error("Icon template not found at {}", path.display())]
    MissingTemplate { path: PathBuf },

    #[error("Failed to render icon {}: {message}", path.display())]
    RenderFailed { path: PathBuf, message: String },

    #[error("IO error writing icon: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl HuddleError for IconError {
    fn error_code(&self) -> &'static str {
        match self {
            IconError::NoTemplate => "ICON_NO_TEMPLATE",
            IconError::MissingTemplate { .. } => "ICON_MISSING_TEMPLATE",
            IconError::RenderFailed { .. } => "ICON_RENDER_FAILED",
            IconError::IoError { .. } => "ICON_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            IconError::NoTemplate | IconError::MissingTemplate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_template_display() {
        let error = IconError::MissingTemplate {
            path: PathBuf::from("/data/icon.png"),
        };
        assert_eq!(error.to_string(), "Icon template not found at /data/icon.png");
        assert_eq!(error.error_code(), "ICON_MISSING_TEMPLATE");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_render_failed_is_not_user_error() {
        let error = IconError::RenderFailed {
            path: PathBuf::from("/data/icons/a.png"),
            message: "bad png".to_string(),
        };
        assert_eq!(error.error_code(), "ICON_RENDER_FAILED");
        assert!(!error.is_user_error());
    }
}
