//! Event cache file with atomic replace-whole-file writes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cache::clock::{Clock, SystemClock};
use crate::cache::errors::CacheError;
use crate::types::Dataset;

/// What is stored on disk: the dataset and when it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub saved_at: DateTime<Utc>,
    pub dataset: Dataset,
}

/// Result of a cache read.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// Data within the requested age.
    Hit(CacheEntry),
    /// Data exists but is older than the requested age.
    Stale { age: Duration },
    /// Nothing has been cached yet.
    Absent,
}

impl CacheLookup {
    pub fn into_dataset(self) -> Option<Dataset> {
        match self {
            CacheLookup::Hit(entry) => Some(entry.dataset),
            CacheLookup::Stale { .. } | CacheLookup::Absent => None,
        }
    }
}

/// Single-dataset cache backed by one JSON file.
///
/// Only the refresh job writes; readers never lock. Writes go to a temp file
/// that is renamed over the cache file, so a reader sees either the old or
/// the new entry.
#[derive(Clone)]
pub struct EventCache {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl EventCache {
    pub fn new(path: PathBuf) -> Self {
        Self::with_clock(path, Arc::new(SystemClock))
    }

    pub fn with_clock(path: PathBuf, clock: Arc<dyn Clock>) -> Self {
        Self { path, clock }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the stored dataset and stamp it with the current time.
    pub fn save(&self, dataset: &Dataset) -> Result<(), CacheError> {
        let entry = CacheEntry {
            saved_at: self.clock.now(),
            dataset: dataset.clone(),
        };
        let json = serde_json::to_string(&entry).map_err(|e| {
            tracing::error!(
                event = "core.cache.serialization_failed",
                error = %e,
            );
            CacheError::SerializeFailed {
                message: e.to_string(),
            }
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_file = self.path.with_extension("json.tmp");
        if let Err(e) = fs::write(&temp_file, &json) {
            cleanup_temp_file(&temp_file, &e);
            return Err(CacheError::IoError { source: e });
        }
        if let Err(e) = fs::rename(&temp_file, &self.path) {
            cleanup_temp_file(&temp_file, &e);
            return Err(CacheError::IoError { source: e });
        }

        info!(
            event = "core.cache.save_completed",
            path = %self.path.display(),
            events = dataset.events.len(),
            has_error = dataset.has_error(),
        );
        Ok(())
    }

    /// Read the stored entry regardless of age.
    pub fn read_entry(&self) -> Result<Option<CacheEntry>, CacheError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::IoError { source: e }),
        };

        let entry = serde_json::from_str(&content).map_err(|e| {
            warn!(
                event = "core.cache.parse_failed",
                path = %self.path.display(),
                error = %e,
            );
            CacheError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;
        Ok(Some(entry))
    }

    /// Read the dataset if it is no older than `max_age`.
    ///
    /// A zero `max_age` returns whatever is stored regardless of age.
    pub fn load(&self, max_age: Duration) -> Result<CacheLookup, CacheError> {
        let Some(entry) = self.read_entry()? else {
            debug!(event = "core.cache.load_absent", path = %self.path.display());
            return Ok(CacheLookup::Absent);
        };

        let age = self.age_of(&entry);
        if max_age.is_zero() || age <= max_age {
            debug!(event = "core.cache.load_hit", age_secs = age.as_secs());
            Ok(CacheLookup::Hit(entry))
        } else {
            debug!(
                event = "core.cache.load_stale",
                age_secs = age.as_secs(),
                max_age_secs = max_age.as_secs(),
            );
            Ok(CacheLookup::Stale { age })
        }
    }

    /// Whether [`load`](Self::load) would hit for `max_age`.
    ///
    /// Read failures count as not fresh so they lead to a refresh rather
    /// than an error on the interactive path.
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        match self.load(max_age) {
            Ok(CacheLookup::Hit(_)) => true,
            Ok(_) => false,
            Err(e) => {
                warn!(event = "core.cache.freshness_check_failed", error = %e);
                false
            }
        }
    }

    /// Age of the stored entry, if any.
    pub fn age(&self) -> Result<Option<Duration>, CacheError> {
        Ok(self.read_entry()?.map(|entry| self.age_of(&entry)))
    }

    fn age_of(&self, entry: &CacheEntry) -> Duration {
        // Negative ages (clock moved backwards) count as brand new.
        (self.clock.now() - entry.saved_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        warn!(
            event = "core.cache.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedClock;
    use crate::types::{Color, Event};
    use chrono::{NaiveDate, TimeZone};
    use tempfile::TempDir;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    fn sample_event() -> Event {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        Event {
            title: "Standup".to_string(),
            start_date: day.and_hms_opt(10, 0, 0).unwrap(),
            end_date: day.and_hms_opt(10, 15, 0).unwrap(),
            account: "Work".to_string(),
            calendar: "Team".to_string(),
            url: "https://meet.example/abc".to_string(),
            location: String::new(),
            notes: String::new(),
            color: Color::new(0.2, 0.8, 0.5, 1.0),
            uid: "evt-1".to_string(),
        }
    }

    fn cache_with_clock(temp: &TempDir) -> (EventCache, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(start()));
        let cache = EventCache::with_clock(temp.path().join("events.json"), clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_load_absent_when_nothing_saved() {
        let temp = TempDir::new().unwrap();
        let (cache, _) = cache_with_clock(&temp);
        assert_eq!(cache.load(Duration::ZERO).unwrap(), CacheLookup::Absent);
        assert!(!cache.is_fresh(Duration::from_secs(600)));
        assert_eq!(cache.age().unwrap(), None);
    }

    #[test]
    fn test_save_then_load_hit() {
        let temp = TempDir::new().unwrap();
        let (cache, _) = cache_with_clock(&temp);
        let dataset = Dataset::from_events(vec![sample_event()]);

        cache.save(&dataset).unwrap();

        match cache.load(Duration::from_secs(600)).unwrap() {
            CacheLookup::Hit(entry) => {
                assert_eq!(entry.dataset, dataset);
                assert_eq!(entry.saved_at, start());
            }
            other => panic!("expected hit, got {other:?}"),
        }
        assert!(cache.is_fresh(Duration::from_secs(600)));
    }

    #[test]
    fn test_stale_is_distinct_from_absent() {
        let temp = TempDir::new().unwrap();
        let (cache, clock) = cache_with_clock(&temp);
        cache.save(&Dataset::default()).unwrap();

        clock.advance(chrono::Duration::seconds(601));

        assert_eq!(
            cache.load(Duration::from_secs(600)).unwrap(),
            CacheLookup::Stale {
                age: Duration::from_secs(601)
            }
        );
        assert!(!cache.is_fresh(Duration::from_secs(600)));
    }

    #[test]
    fn test_age_exactly_at_limit_is_fresh() {
        let temp = TempDir::new().unwrap();
        let (cache, clock) = cache_with_clock(&temp);
        cache.save(&Dataset::default()).unwrap();
        clock.advance(chrono::Duration::seconds(600));
        assert!(cache.is_fresh(Duration::from_secs(600)));
    }

    #[test]
    fn test_zero_max_age_is_unbounded() {
        let temp = TempDir::new().unwrap();
        let (cache, clock) = cache_with_clock(&temp);
        cache.save(&Dataset::from_events(vec![sample_event()])).unwrap();
        clock.advance(chrono::Duration::days(30));

        let dataset = cache.load(Duration::ZERO).unwrap().into_dataset();
        assert_eq!(dataset.unwrap().events.len(), 1);
    }

    #[test]
    fn test_save_replaces_whole_dataset_and_timestamp() {
        let temp = TempDir::new().unwrap();
        let (cache, clock) = cache_with_clock(&temp);
        cache.save(&Dataset::from_events(vec![sample_event()])).unwrap();

        clock.advance(chrono::Duration::seconds(900));
        cache.save(&Dataset::from_error("Calendar access denied")).unwrap();

        let entry = cache.read_entry().unwrap().unwrap();
        assert!(entry.dataset.events.is_empty());
        assert!(entry.dataset.has_error());
        assert_eq!(entry.saved_at, start() + chrono::Duration::seconds(900));
        assert!(!temp.path().join("events.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_error_not_absent() {
        let temp = TempDir::new().unwrap();
        let (cache, _) = cache_with_clock(&temp);
        fs::write(cache.path(), "{not json").unwrap();

        assert!(matches!(
            cache.load(Duration::ZERO),
            Err(CacheError::Corrupt { .. })
        ));
        assert!(!cache.is_fresh(Duration::from_secs(600)));
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp = TempDir::new().unwrap();
        let cache = EventCache::new(temp.path().join("nested").join("events.json"));
        cache.save(&Dataset::default()).unwrap();
        assert!(cache.path().is_file());
    }

    #[test]
    fn test_clock_moving_backwards_counts_as_fresh() {
        let temp = TempDir::new().unwrap();
        let (cache, clock) = cache_with_clock(&temp);
        cache.save(&Dataset::default()).unwrap();
        clock.advance(chrono::Duration::seconds(-30));
        assert_eq!(cache.age().unwrap(), Some(Duration::ZERO));
    }
}
