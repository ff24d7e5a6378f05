use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::cache::CacheLookup;
use crate::config::Config;
use crate::query::errors::QueryError;
use crate::query::filter::EventFilter;
use crate::query::matcher::{FuzzyMatcher, Matcher, rank};
use crate::query::types::{QueryResponse, QueryResult};
use crate::refresh::RefreshCoordinator;

/// Answers interactive searches from the cache without waiting on the
/// data source.
pub struct QueryPipeline<'a> {
    config: &'a Config,
    coordinator: &'a RefreshCoordinator,
    matcher: Box<dyn Matcher>,
    now: Option<NaiveDateTime>,
}

impl<'a> QueryPipeline<'a> {
    pub fn new(config: &'a Config, coordinator: &'a RefreshCoordinator) -> Self {
        Self {
            config,
            coordinator,
            matcher: Box::new(FuzzyMatcher),
            now: None,
        }
    }

    pub fn with_matcher(mut self, matcher: Box<dyn Matcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Evaluate event expiry against `now` instead of the local clock.
    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = Some(now);
        self
    }

    /// Search cached events, launching a background refresh if the cache is
    /// older than `max_cache_age`.
    pub fn query(
        &self,
        user_query: &str,
        max_cache_age: Duration,
    ) -> Result<QueryResponse, QueryError> {
        let cache = self.coordinator.cache();

        let mut still_loading = self.coordinator.is_refreshing();
        if !still_loading && !cache.is_fresh(max_cache_age) {
            // A refresh is under way either way: ours, or one another process
            // claimed first.
            let launched = self.coordinator.launch_refresh(false)?;
            debug!(event = "core.query.refresh_requested", launched);
            still_loading = true;
        }

        let entry = match cache.load(Duration::ZERO)? {
            CacheLookup::Hit(entry) => entry,
            CacheLookup::Stale { .. } | CacheLookup::Absent => {
                debug!(event = "core.query.no_data", still_loading);
                return Ok(QueryResponse {
                    still_loading,
                    ..QueryResponse::default()
                });
            }
        };

        let dataset = entry.dataset;
        if let Some(message) = dataset.error.filter(|e| !e.is_empty()) {
            warn!(event = "core.query.data_source_error", error = %message, still_loading);
            return Ok(QueryResponse {
                still_loading,
                has_data: true,
                error: Some(message),
                ..QueryResponse::default()
            });
        }

        let now = self.now.unwrap_or_else(|| Local::now().naive_local());
        let mut events = EventFilter::new(self.config, now).filter(&dataset.events);

        let user_query = user_query.trim();
        if !user_query.is_empty() {
            events = rank(self.matcher.as_ref(), user_query, events, |e| e.title.as_str());
        }

        let icons = self.coordinator.icons();
        let results: Vec<QueryResult> = events
            .into_iter()
            .map(|event| {
                let icon = icons.get_icon_or_default(&event.color);
                QueryResult::from_event(event, icon)
            })
            .collect();

        info!(
            event = "core.query.search_completed",
            query = user_query,
            results = results.len(),
            still_loading,
        );

        Ok(QueryResponse {
            results,
            still_loading,
            has_data: true,
            error: None,
        })
    }
}
