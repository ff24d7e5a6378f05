//! Fakes shared by the refresh and query tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use tempfile::TempDir;

use crate::cache::Clock;
use crate::icons::{IconCache, IconError, IconRenderer};
use crate::jobs::{JobError, JobRegistry};
use crate::notify::Notifier;
use crate::source::{CalendarSource, SourceError};
use crate::types::{Color, Dataset, Event};

pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn event(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
    Event {
        title: title.to_string(),
        start_date: start,
        end_date: end,
        account: "Work".to_string(),
        calendar: "Team".to_string(),
        url: String::new(),
        location: String::new(),
        notes: String::new(),
        color: Color::new(0.2, 0.8, 0.5, 1.0),
        uid: format!("{}-uid", title.to_lowercase()),
    }
}

/// A clock that only moves when told to.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Returns a fixed result and counts fetches.
pub struct FakeSource {
    result: Mutex<Option<Result<Dataset, SourceError>>>,
    pub fetches: Arc<AtomicUsize>,
}

impl FakeSource {
    pub fn returning(result: Result<Dataset, SourceError>) -> Self {
        Self {
            result: Mutex::new(Some(result)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl CalendarSource for FakeSource {
    fn fetch(&self, _lookahead_days: u32) -> Result<Dataset, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(Dataset::default()))
    }
}

/// Records launches instead of spawning processes.
#[derive(Default)]
pub struct FakeJobs {
    pub running: AtomicBool,
    pub launches: Mutex<Vec<(String, Vec<String>)>>,
    pub released: AtomicUsize,
    /// Another process claims the job between the check and the launch.
    pub claimed_elsewhere: AtomicBool,
}

impl FakeJobs {
    pub fn launch_count(&self) -> usize {
        self.launches.lock().unwrap().len()
    }
}

impl JobRegistry for Arc<FakeJobs> {
    fn is_running(&self, _name: &str) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn launch(&self, name: &str, args: &[String]) -> Result<bool, JobError> {
        if self.claimed_elsewhere.load(Ordering::SeqCst) {
            return Ok(false);
        }
        if self.running.swap(true, Ordering::SeqCst) {
            return Ok(false);
        }
        self.launches
            .lock()
            .unwrap()
            .push((name.to_string(), args.to_vec()));
        Ok(true)
    }

    fn release(&self, _name: &str) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl Notifier for Arc<RecordingNotifier> {
    fn notify(&self, title: &str, message: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}

/// Writes a placeholder file and counts renders.
pub struct CountingRenderer {
    pub calls: Arc<AtomicUsize>,
}

impl IconRenderer for CountingRenderer {
    fn render(&self, _template: &Path, outfile: &Path, _color: Color) -> Result<(), IconError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        fs::write(outfile, b"png")?;
        Ok(())
    }
}

/// Icon cache under `temp` with a real template file and a counting renderer.
pub fn icon_cache(temp: &TempDir) -> (IconCache, Arc<AtomicUsize>) {
    let template: PathBuf = temp.path().join("icon.png");
    fs::write(&template, b"mask").unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let cache = IconCache::with_renderer(
        temp.path().join("icons"),
        template.clone(),
        Some(template),
        Box::new(CountingRenderer {
            calls: Arc::clone(&calls),
        }),
    );
    (cache, calls)
}
