use std::path::PathBuf;

use crate::errors::HuddleError;

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("PID file error at {}: {message}", path.display())]
    PidFile { path: PathBuf, message: String },

    #[error("Failed to launch job '{name}': {message}")]
    SpawnFailed { name: String, message: String },

    #[error("Cannot determine current executable: {message}")]
    CurrentExe { message: String },
}

impl HuddleError for JobError {
    fn error_code(&self) -> &'static str {
        match self {
            JobError::PidFile { .. } => "JOB_PID_FILE_ERROR",
            JobError::SpawnFailed { .. } => "JOB_SPAWN_FAILED",
            JobError::CurrentExe { .. } => "JOB_CURRENT_EXE",
        }
    }
}
