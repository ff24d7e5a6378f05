use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::types::Event;

/// One event ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub title: String,
    pub subtitle: String,
    /// The conference link.
    pub url: String,
    pub icon: PathBuf,
    pub calendar: String,
    pub account: String,
    pub uid: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl QueryResult {
    pub fn from_event(event: Event, icon: PathBuf) -> Self {
        Self {
            subtitle: subtitle(&event),
            title: event.title,
            url: event.url,
            icon,
            calendar: event.calendar,
            account: event.account,
            uid: event.uid,
            start: event.start_date,
            end: event.end_date,
        }
    }
}

/// `HH:MM–HH:MM on YYYY-MM-DD // calendar (account)`
pub fn subtitle(event: &Event) -> String {
    format!(
        "{}–{} on {} // {} ({})",
        event.start_date.format("%H:%M"),
        event.end_date.format("%H:%M"),
        event.start_date.format("%Y-%m-%d"),
        event.calendar,
        event.account,
    )
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResponse {
    pub results: Vec<QueryResult>,
    /// A refresh is in flight; ask again shortly.
    pub still_loading: bool,
    /// Whether anything was cached at all.
    pub has_data: bool,
    /// Error the data source reported on its last fetch. No results are
    /// returned alongside it.
    pub error: Option<String>,
}
