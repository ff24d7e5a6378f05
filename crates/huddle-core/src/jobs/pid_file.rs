//! PID files that record which process owns a named job.
//!
//! A PID file is claimed with create-new semantics so two launchers racing
//! for the same job cannot both win.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::time::{Duration, SystemTime};

use sysinfo::{Pid, ProcessStatus, ProcessesToUpdate, System};
use tracing::{debug, warn};

use crate::jobs::errors::JobError;

/// How long an empty PID file is treated as a claim in progress.
const CLAIM_GRACE: Duration = Duration::from_secs(5);

/// What a PID file says about its job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PidState {
    /// No PID file.
    Missing,
    /// The recorded process is alive, or a claim is being written.
    Alive,
    /// The file is left over from a dead process or is unreadable.
    Stale,
}

/// Atomically create `path` and write `pid` into it.
///
/// Returns `Ok(false)` if the file already exists.
pub fn claim_pid_file(path: &Path, pid: u32) -> Result<bool, JobError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| JobError::PidFile {
            path: parent.to_path_buf(),
            message: format!("Failed to create PID directory: {}", e),
        })?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(JobError::PidFile {
                path: path.to_path_buf(),
                message: format!("Failed to create PID file: {}", e),
            });
        }
    };

    writeln!(file, "{}", pid).map_err(|e| JobError::PidFile {
        path: path.to_path_buf(),
        message: format!("Failed to write PID file: {}", e),
    })?;

    debug!(event = "core.pid_file.claimed", pid, path = %path.display());
    Ok(true)
}

/// Replace the PID recorded in an already claimed file.
pub fn write_pid_file(path: &Path, pid: u32) -> Result<(), JobError> {
    fs::write(path, format!("{}\n", pid)).map_err(|e| JobError::PidFile {
        path: path.to_path_buf(),
        message: format!("Failed to write PID file: {}", e),
    })
}

/// Read the PID from a PID file. `None` for a missing, empty or invalid file.
pub fn read_pid_file(path: &Path) -> Option<u32> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(
                event = "core.pid_file.read_failed",
                path = %path.display(),
                error = %e,
            );
            return None;
        }
    };

    match content.trim().parse::<u32>() {
        Ok(pid) => Some(pid),
        Err(_) => {
            debug!(
                event = "core.pid_file.parse_failed",
                path = %path.display(),
                content = %content.trim(),
            );
            None
        }
    }
}

/// Delete a PID file. A missing file is not an error.
pub fn delete_pid_file(path: &Path) -> Result<(), JobError> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(event = "core.pid_file.deleted", path = %path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(JobError::PidFile {
            path: path.to_path_buf(),
            message: format!("Failed to delete PID file: {}", e),
        }),
    }
}

/// Inspect a PID file and the process it names.
pub fn pid_state(path: &Path) -> PidState {
    if !path.exists() {
        return PidState::Missing;
    }

    match read_pid_file(path) {
        Some(pid) if is_process_running(pid) => PidState::Alive,
        Some(_) => PidState::Stale,
        None if is_recent(path) => PidState::Alive,
        None => PidState::Stale,
    }
}

/// Check whether `pid` names a live (non-zombie) process.
pub fn is_process_running(pid: u32) -> bool {
    let pid = Pid::from_u32(pid);
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    system
        .process(pid)
        .is_some_and(|process| process.status() != ProcessStatus::Zombie)
}

fn is_recent(path: &Path) -> bool {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .is_some_and(|age| age < CLAIM_GRACE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_claim_is_exclusive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pids").join("reload.pid");

        assert!(claim_pid_file(&path, 42).unwrap());
        assert!(!claim_pid_file(&path, 43).unwrap());
        assert_eq!(read_pid_file(&path), Some(42));
    }

    #[test]
    fn test_read_pid_file_invalid_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("reload.pid");

        assert_eq!(read_pid_file(&path), None);
        fs::write(&path, "not-a-pid").unwrap();
        assert_eq!(read_pid_file(&path), None);
        fs::write(&path, "  1234 \n").unwrap();
        assert_eq!(read_pid_file(&path), Some(1234));
    }

    #[test]
    fn test_delete_pid_file_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("reload.pid");
        assert!(delete_pid_file(&path).is_ok());

        fs::write(&path, "1").unwrap();
        delete_pid_file(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_pid_state() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("reload.pid");
        assert_eq!(pid_state(&path), PidState::Missing);

        write_pid_file(&path, std::process::id()).unwrap();
        assert_eq!(pid_state(&path), PidState::Alive);

        write_pid_file(&path, 999_999_999).unwrap();
        assert_eq!(pid_state(&path), PidState::Stale);
    }

    #[test]
    fn test_fresh_empty_file_counts_as_claim_in_progress() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("reload.pid");
        fs::write(&path, "").unwrap();
        assert_eq!(pid_state(&path), PidState::Alive);
    }

    #[test]
    fn test_is_process_running() {
        assert!(is_process_running(std::process::id()));
        assert!(!is_process_running(999_999_999));
    }
}
