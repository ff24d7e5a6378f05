//! Data source backed by an external program.

use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::source::CalendarSource;
use crate::source::errors::SourceError;
use crate::source::payload::parse_payload;
use crate::types::Dataset;

/// Runs `program [args...] <lookahead_days>` and parses its stdout.
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Arguments placed before the lookahead days.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl CalendarSource for CommandSource {
    fn fetch(&self, lookahead_days: u32) -> Result<Dataset, SourceError> {
        info!(
            event = "core.source.fetch_started",
            program = %self.program,
            lookahead_days,
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(lookahead_days.to_string())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| SourceError::SpawnFailed {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(
                event = "core.source.fetch_failed",
                program = %self.program,
                status = %output.status,
                stderr = %stderr,
            );
            return Err(SourceError::ExitStatus {
                program: self.program.clone(),
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let dataset = parse_payload(&stdout)?;

        debug!(
            event = "core.source.fetch_completed",
            events = dataset.events.len(),
            has_error = dataset.has_error(),
        );
        Ok(dataset)
    }
}
