//! Calendar data source.
//!
//! The source is an external program that prints a JSON payload of upcoming
//! events. It may be slow, which is why its output is cached.

pub mod command;
pub mod errors;
pub mod payload;
pub mod reveal;

pub use command::CommandSource;
pub use errors::SourceError;
pub use payload::{parse_date, parse_payload};
pub use reveal::reveal_event;

use crate::types::Dataset;

/// Fetches the events of the next `lookahead_days` days.
pub trait CalendarSource: Send + Sync {
    fn fetch(&self, lookahead_days: u32) -> Result<Dataset, SourceError>;
}
