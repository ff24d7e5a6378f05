use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory location.
pub const HOME_ENV: &str = "HUDDLE_HOME";

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("home directory not found; set $HOME or $HUDDLE_HOME")]
    HomeNotFound,
}

/// Centralized path construction for the `~/.huddle/` directory layout.
///
/// Single source of truth for every path under the data directory. Use
/// `resolve()` in production code and `from_dir()` in tests.
#[derive(Debug, Clone)]
pub struct HuddlePaths {
    data_dir: PathBuf,
}

impl HuddlePaths {
    /// Resolve paths from `$HUDDLE_HOME`, falling back to `~/.huddle`.
    pub fn resolve() -> Result<Self, PathError> {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self {
                data_dir: PathBuf::from(dir),
            });
        }
        let home = dirs::home_dir().ok_or(PathError::HomeNotFound)?;
        Ok(Self {
            data_dir: home.join(".huddle"),
        })
    }

    /// Create paths from an explicit base directory. Use in tests.
    pub fn from_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// The base data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // --- Subdirectories ---

    pub fn icons_dir(&self) -> PathBuf {
        self.data_dir.join("icons")
    }

    pub fn pids_dir(&self) -> PathBuf {
        self.data_dir.join("pids")
    }

    // --- Files ---

    pub fn events_cache(&self) -> PathBuf {
        self.data_dir.join("events.json")
    }

    pub fn user_config(&self) -> PathBuf {
        self.data_dir.join("config.toml")
    }

    /// Mask image used to render calendar-colored icons. Doubles as the
    /// default icon when no colored variant exists yet.
    pub fn icon_template(&self) -> PathBuf {
        self.data_dir.join("icon.png")
    }

    pub fn reload_icon(&self) -> PathBuf {
        self.data_dir.join("reload.png")
    }

    // --- Parameterized paths ---

    pub fn job_pid_file(&self, job_name: &str) -> PathBuf {
        let safe_name = job_name.replace('/', "-");
        self.pids_dir().join(format!("{safe_name}.pid"))
    }
}
