//! Reveal an event in the calendar application.

use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::source::errors::SourceError;

/// Launch `program <calendar> <uid>` without waiting for it.
///
/// Only a failure to start the program is reported.
pub fn reveal_event(program: &str, calendar: &str, uid: &str) -> Result<(), SourceError> {
    info!(
        event = "core.source.reveal_started",
        program = %program,
        calendar = %calendar,
        uid = %uid,
    );

    Command::new(program)
        .arg(calendar)
        .arg(uid)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            warn!(
                event = "core.source.reveal_failed",
                program = %program,
                error = %e,
            );
            SourceError::SpawnFailed {
                program: program.to_string(),
                message: e.to_string(),
            }
        })?;

    Ok(())
}
