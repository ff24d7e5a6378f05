//! Domain types shared across the cache, icon and query layers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Calendar color as `(red, green, blue, alpha)`, each usually in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color([f64; 4]);

impl Color {
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self([red, green, blue, alpha])
    }

    pub fn components(&self) -> [f64; 4] {
        self.0
    }

    pub fn red(&self) -> f64 {
        self.0[0]
    }

    pub fn green(&self) -> f64 {
        self.0[1]
    }

    pub fn blue(&self) -> f64 {
        self.0[2]
    }

    pub fn alpha(&self) -> f64 {
        self.0[3]
    }
}

impl From<[f64; 4]> for Color {
    fn from(components: [f64; 4]) -> Self {
        Self(components)
    }
}

/// One calendar event as fetched from the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub account: String,
    pub calendar: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
    pub color: Color,
    pub uid: String,
}

impl Event {
    /// Fields searched for conference URLs, in priority order.
    pub fn candidate_fields(&self) -> [&str; 3] {
        [&self.url, &self.location, &self.notes]
    }
}

/// Result of one fetch cycle.
///
/// When `error` is set the event list is not authoritative and must not be
/// shown as if it were.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Dataset {
    pub fn from_events(events: Vec<Event>) -> Self {
        Self {
            events,
            error: None,
        }
    }

    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            events: Vec::new(),
            error: Some(message.into()),
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_serializes_as_array() {
        let color = Color::new(0.2, 0.8, 0.5, 1.0);
        assert_eq!(serde_json::to_string(&color).unwrap(), "[0.2,0.8,0.5,1.0]");
    }

    #[test]
    fn test_color_component_equality_ignores_zero_sign() {
        assert_eq!(Color::new(0.0, 0.5, 0.5, 1.0), Color::new(-0.0, 0.5, 0.5, 1.0));
    }

    #[test]
    fn test_dataset_error_detection() {
        assert!(Dataset::from_error("access denied").has_error());
        assert!(!Dataset::from_events(Vec::new()).has_error());
        let blank = Dataset {
            events: Vec::new(),
            error: Some(String::new()),
        };
        assert!(!blank.has_error());
    }
}
