//! Selection of events that are video conferences worth showing.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::Config;
use crate::types::Event;

/// Keeps upcoming or ongoing events from allowed accounts and calendars
/// that carry a conference link.
pub struct EventFilter<'a> {
    config: &'a Config,
    now: NaiveDateTime,
}

impl<'a> EventFilter<'a> {
    pub fn new(config: &'a Config, now: NaiveDateTime) -> Self {
        Self { config, now }
    }

    /// The event with its `url` set to the conference link, or `None` if it
    /// is filtered out.
    pub fn apply(&self, event: &Event) -> Option<Event> {
        if event.end_date < self.now {
            return None;
        }
        if !self.config.account_allowed(&event.account)
            || !self.config.calendar_allowed(&event.calendar)
        {
            return None;
        }

        let link = self.conference_link(event)?;
        Some(Event {
            url: link.to_string(),
            ..event.clone()
        })
    }

    /// First pattern match, searching url then location then notes.
    pub fn conference_link<'e>(&self, event: &'e Event) -> Option<&'e str> {
        event.candidate_fields().into_iter().find_map(|field| {
            self.config
                .patterns
                .iter()
                .find_map(|pattern| pattern.find(field))
                .map(|m| m.as_str())
        })
    }

    pub fn filter(&self, events: &[Event]) -> Vec<Event> {
        let kept: Vec<Event> = events.iter().filter_map(|e| self.apply(e)).collect();
        debug!(
            event = "core.query.filter_completed",
            kept = kept.len(),
            total = events.len(),
        );
        kept
    }
}
