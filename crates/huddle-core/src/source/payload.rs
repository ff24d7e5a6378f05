//! Wire format of the data source.
//!
//! ```json
//! {"events": [{"title": "...", "start_date": "2026-03-02T10:00:00+01:00", ...}], "error": null}
//! ```

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::source::errors::SourceError;
use crate::types::{Color, Dataset, Event};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_SIGNIFICANT_CHARS: usize = 19;

#[derive(Debug, Deserialize)]
struct RawPayload {
    #[serde(default)]
    events: Vec<RawEvent>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    title: String,
    start_date: String,
    end_date: String,
    #[serde(default)]
    account: Option<String>,
    #[serde(default)]
    calendar: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(alias = "colour")]
    color: Color,
    uid: String,
}

/// Parse a source timestamp as local naive time.
///
/// Only the first 19 characters count; fractional seconds and zone offsets
/// after them are ignored.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let significant = value.get(..DATE_SIGNIFICANT_CHARS).unwrap_or(value);
    NaiveDateTime::parse_from_str(significant, DATE_FORMAT).ok()
}

/// Decode the source's JSON output into a [`Dataset`].
pub fn parse_payload(json: &str) -> Result<Dataset, SourceError> {
    let raw: RawPayload = serde_json::from_str(json).map_err(|e| SourceError::InvalidPayload {
        message: e.to_string(),
    })?;

    let events = raw
        .events
        .into_iter()
        .map(RawEvent::into_event)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset {
        events,
        error: raw.error.filter(|e| !e.is_empty()),
    })
}

impl RawEvent {
    fn into_event(self) -> Result<Event, SourceError> {
        let start_date = parse_date(&self.start_date).ok_or_else(|| SourceError::InvalidDate {
            title: self.title.clone(),
            value: self.start_date.clone(),
        })?;
        let end_date = parse_date(&self.end_date).ok_or_else(|| SourceError::InvalidDate {
            title: self.title.clone(),
            value: self.end_date.clone(),
        })?;

        Ok(Event {
            title: self.title,
            start_date,
            end_date,
            account: self.account.unwrap_or_default(),
            calendar: self.calendar.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            color: self.color,
            uid: self.uid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_date_ignores_fraction_and_offset() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(parse_date("2026-03-02T10:30:00"), Some(expected));
        assert_eq!(parse_date("2026-03-02T10:30:00.000+01:00"), Some(expected));
        assert_eq!(parse_date("2026-03-02T10:30:00Z"), Some(expected));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date("tomorrow"), None);
        assert_eq!(parse_date("2026-03-02"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_date_handles_multibyte_input() {
        assert_eq!(parse_date("2026-03-02T10:30:0é"), None);
    }

    #[test]
    fn test_parse_payload_events() {
        let json = r#"{
            "events": [{
                "title": "Standup",
                "start_date": "2026-03-02T10:00:00+01:00",
                "end_date": "2026-03-02T10:15:00+01:00",
                "account": "Work",
                "calendar": "Team",
                "url": null,
                "location": "Join at https://meet.example/abc",
                "notes": "",
                "colour": [0.2, 0.8, 0.5, 1],
                "uid": "evt-1"
            }]
        }"#;

        let dataset = parse_payload(json).unwrap();
        assert!(!dataset.has_error());
        assert_eq!(dataset.events.len(), 1);
        let event = &dataset.events[0];
        assert_eq!(event.title, "Standup");
        assert_eq!(event.url, "");
        assert_eq!(event.location, "Join at https://meet.example/abc");
        assert_eq!(event.color, Color::new(0.2, 0.8, 0.5, 1.0));
    }

    #[test]
    fn test_parse_payload_error_only() {
        let dataset = parse_payload(r#"{"error": "Calendar access denied"}"#).unwrap();
        assert!(dataset.events.is_empty());
        assert_eq!(dataset.error.as_deref(), Some("Calendar access denied"));
    }

    #[test]
    fn test_parse_payload_blank_error_is_none() {
        let dataset = parse_payload(r#"{"events": [], "error": ""}"#).unwrap();
        assert_eq!(dataset.error, None);
    }

    #[test]
    fn test_parse_payload_invalid_json() {
        assert!(matches!(
            parse_payload("Execution error"),
            Err(SourceError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_parse_payload_invalid_date() {
        let json = r#"{"events": [{
            "title": "Broken", "start_date": "soon", "end_date": "later",
            "color": [0, 0, 0, 1], "uid": "x"
        }]}"#;
        assert!(matches!(
            parse_payload(json),
            Err(SourceError::InvalidDate { .. })
        ));
    }
}
