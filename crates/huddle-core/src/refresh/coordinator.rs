use std::sync::atomic::{AtomicBool, Ordering};

use huddle_paths::HuddlePaths;
use tracing::{error, info, warn};

use crate::cache::EventCache;
use crate::config::Config;
use crate::icons::{IconBatch, IconCache};
use crate::jobs::{JobRegistry, PidJobRegistry, RELOAD_JOB};
use crate::notify::{DesktopNotifier, NOTIFICATION_TITLE, Notifier, format_reload_message};
use crate::refresh::errors::RefreshError;
use crate::source::{CalendarSource, CommandSource};

/// What a synchronous refresh did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The dataset was fetched and written to the cache.
    Completed {
        events: usize,
        error: Option<String>,
        icons: IconBatch,
    },
    /// Another refresh holds this coordinator; nothing was done.
    AlreadyRunning,
}

/// Decides when the event cache is refreshed and makes sure only one
/// refresh runs at a time.
pub struct RefreshCoordinator {
    lookahead_days: u32,
    cache: EventCache,
    icons: IconCache,
    source: Box<dyn CalendarSource>,
    jobs: Box<dyn JobRegistry>,
    notifier: Box<dyn Notifier>,
    running: AtomicBool,
}

/// Clears the in-process flag and releases the job on every exit path.
struct RunningGuard<'a> {
    running: &'a AtomicBool,
    jobs: &'a dyn JobRegistry,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.jobs.release(RELOAD_JOB);
        self.running.store(false, Ordering::SeqCst);
    }
}

impl RefreshCoordinator {
    pub fn new(
        config: &Config,
        cache: EventCache,
        icons: IconCache,
        source: Box<dyn CalendarSource>,
        jobs: Box<dyn JobRegistry>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            lookahead_days: config.lookahead_days,
            cache,
            icons,
            source,
            jobs,
            notifier,
            running: AtomicBool::new(false),
        }
    }

    /// Production wiring: files under `paths`, the configured source
    /// command, PID-file jobs relaunching this executable and desktop
    /// notifications.
    pub fn for_paths(config: &Config, paths: &HuddlePaths) -> Result<Self, RefreshError> {
        let template = config
            .icon_template
            .clone()
            .unwrap_or_else(|| paths.icon_template());
        let icons = IconCache::new(paths.icons_dir(), paths.icon_template(), Some(template));

        Ok(Self::new(
            config,
            EventCache::new(paths.events_cache()),
            icons,
            Box::new(CommandSource::new(config.source_command.clone())),
            Box::new(PidJobRegistry::for_current_exe(paths)?),
            Box::new(DesktopNotifier),
        ))
    }

    pub fn cache(&self) -> &EventCache {
        &self.cache
    }

    pub fn icons(&self) -> &IconCache {
        &self.icons
    }

    /// Fetch events, store them and pre-render their icons.
    ///
    /// This is the body of the `reload` job and blocks until done. A fetch
    /// that cannot complete leaves the cache untouched. An error reported
    /// by the data source is stored like any other dataset.
    pub fn start_refresh(&self, notify: bool) -> Result<RefreshOutcome, RefreshError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            info!(event = "core.refresh.start_skipped", reason = "already running");
            return Ok(RefreshOutcome::AlreadyRunning);
        }
        let _guard = RunningGuard {
            running: &self.running,
            jobs: self.jobs.as_ref(),
        };

        info!(
            event = "core.refresh.start_started",
            lookahead_days = self.lookahead_days,
            notify,
        );

        let dataset = match self.source.fetch(self.lookahead_days) {
            Ok(dataset) => dataset,
            Err(e) => {
                error!(event = "core.refresh.fetch_failed", error = %e);
                if notify {
                    self.notifier.notify(
                        NOTIFICATION_TITLE,
                        &format_reload_message(0, Some(&e.to_string())),
                    );
                }
                return Err(e.into());
            }
        };

        self.cache.save(&dataset)?;

        if let Some(message) = dataset.error.as_deref().filter(|_| dataset.has_error()) {
            error!(event = "core.refresh.source_reported_error", error = %message);
        }

        let icons = if dataset.events.is_empty() {
            IconBatch::default()
        } else {
            self.icons
                .create_icons(dataset.events.iter().map(|event| event.color))
        };

        let error = dataset.error.clone().filter(|_| dataset.has_error());
        if notify {
            self.notifier.notify(
                NOTIFICATION_TITLE,
                &format_reload_message(dataset.events.len(), error.as_deref()),
            );
        }

        info!(
            event = "core.refresh.start_completed",
            events = dataset.events.len(),
            icons_created = icons.created,
            icons_failed = icons.failed,
        );

        Ok(RefreshOutcome::Completed {
            events: dataset.events.len(),
            error,
            icons,
        })
    }

    /// Whether a refresh is running here or in a background job.
    pub fn is_refreshing(&self) -> bool {
        self.running.load(Ordering::SeqCst) || self.jobs.is_running(RELOAD_JOB)
    }

    /// Start the `reload` job in the background without waiting for it.
    ///
    /// Returns whether a job was launched; `false` if one was already
    /// running.
    pub fn launch_refresh(&self, notify: bool) -> Result<bool, RefreshError> {
        if self.is_refreshing() {
            info!(event = "core.refresh.launch_skipped", reason = "already running");
            return Ok(false);
        }

        let mut args = vec![RELOAD_JOB.to_string()];
        if notify {
            args.push("--notify".to_string());
        }

        let launched = self.jobs.launch(RELOAD_JOB, &args).inspect_err(|e| {
            warn!(event = "core.refresh.launch_failed", error = %e);
        })?;
        if launched {
            info!(event = "core.refresh.launch_completed", notify);
        }
        Ok(launched)
    }

    /// Explicit user reload: background refresh with a completion notice.
    pub fn force_refresh(&self) -> Result<bool, RefreshError> {
        self.launch_refresh(true)
    }
}
