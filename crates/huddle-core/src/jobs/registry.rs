use std::path::PathBuf;
use std::process::{Command, Stdio};

use huddle_paths::HuddlePaths;
use tracing::{debug, info, warn};

use crate::jobs::errors::JobError;
use crate::jobs::pid_file::{self, PidState};

/// Tracks and launches named background jobs.
pub trait JobRegistry: Send + Sync {
    /// Whether a live process currently owns the job.
    fn is_running(&self, name: &str) -> bool;

    /// Start the job in the background unless it is already running.
    ///
    /// Returns `Ok(true)` if a process was launched, `Ok(false)` if one was
    /// already running.
    fn launch(&self, name: &str, args: &[String]) -> Result<bool, JobError>;

    /// Called by the job itself when it completes.
    fn release(&self, name: &str);
}

/// Runs jobs as detached child processes tracked by PID files.
///
/// The PID file is `<data>/pids/<name>.pid`. It is claimed before the child
/// is spawned and then rewritten with the child's PID.
#[derive(Debug, Clone)]
pub struct PidJobRegistry {
    paths: HuddlePaths,
    program: PathBuf,
}

impl PidJobRegistry {
    pub fn new(paths: HuddlePaths, program: PathBuf) -> Self {
        Self { paths, program }
    }

    /// Registry that relaunches the running executable.
    pub fn for_current_exe(paths: &HuddlePaths) -> Result<Self, JobError> {
        let program = std::env::current_exe().map_err(|e| JobError::CurrentExe {
            message: e.to_string(),
        })?;
        Ok(Self::new(paths.clone(), program))
    }

    pub fn pid_file(&self, name: &str) -> PathBuf {
        self.paths.job_pid_file(name)
    }

    fn spawn(&self, name: &str, args: &[String]) -> Result<u32, JobError> {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let child = command.spawn().map_err(|e| JobError::SpawnFailed {
            name: name.to_string(),
            message: format!("{}: {}", self.program.display(), e),
        })?;
        Ok(child.id())
    }
}

impl JobRegistry for PidJobRegistry {
    fn is_running(&self, name: &str) -> bool {
        let path = self.pid_file(name);
        match pid_file::pid_state(&path) {
            PidState::Alive => true,
            PidState::Missing => false,
            PidState::Stale => {
                debug!(event = "core.jobs.stale_pid_file", job = name, path = %path.display());
                if let Err(e) = pid_file::delete_pid_file(&path) {
                    warn!(event = "core.jobs.stale_cleanup_failed", job = name, error = %e);
                }
                false
            }
        }
    }

    fn launch(&self, name: &str, args: &[String]) -> Result<bool, JobError> {
        if self.is_running(name) {
            debug!(event = "core.jobs.launch_skipped", job = name, reason = "running");
            return Ok(false);
        }

        let path = self.pid_file(name);
        if !pid_file::claim_pid_file(&path, std::process::id())? {
            debug!(event = "core.jobs.launch_skipped", job = name, reason = "claimed");
            return Ok(false);
        }

        let pid = match self.spawn(name, args) {
            Ok(pid) => pid,
            Err(e) => {
                if let Err(cleanup_err) = pid_file::delete_pid_file(&path) {
                    warn!(
                        event = "core.jobs.pid_cleanup_failed",
                        job = name,
                        original_error = %e,
                        cleanup_error = %cleanup_err,
                    );
                }
                return Err(e);
            }
        };

        pid_file::write_pid_file(&path, pid)?;
        info!(event = "core.jobs.launch_completed", job = name, pid);
        Ok(true)
    }

    fn release(&self, name: &str) {
        let path = self.pid_file(name);
        if pid_file::read_pid_file(&path) != Some(std::process::id()) {
            return;
        }
        if let Err(e) = pid_file::delete_pid_file(&path) {
            warn!(event = "core.jobs.release_failed", job = name, error = %e);
        }
    }
}
