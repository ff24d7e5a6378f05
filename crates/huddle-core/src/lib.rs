//! huddle-core: cached video-conference search over calendar events
//!
//! Events come from a slow external program, so they are cached on disk and
//! refreshed by a background job while searches read whatever is cached.
//!
//! # Main Entry Points
//!
//! - [`query`] - Filter, rank and decorate cached events
//! - [`refresh`] - Decide when to refresh and run the refresh job
//! - [`cache`] - The event cache file and its freshness rules
//! - [`icons`] - Calendar-colored icons keyed by color
//! - [`config`] - Configuration management

pub mod cache;
pub mod config;
pub mod errors;
pub mod events;
pub mod icons;
pub mod jobs;
pub mod logging;
pub mod notify;
pub mod query;
pub mod refresh;
pub mod source;
pub mod types;

#[cfg(test)]
mod test_support;

pub use cache::{CacheError, CacheLookup, EventCache};
pub use config::{Config, ConfigError};
pub use errors::{HuddleError, HuddleResult};
pub use icons::{IconCache, IconError};
pub use jobs::{JobError, JobRegistry, PidJobRegistry, RELOAD_JOB};
pub use query::{QueryError, QueryPipeline, QueryResponse, QueryResult};
pub use refresh::{RefreshCoordinator, RefreshError, RefreshOutcome};
pub use source::{CalendarSource, CommandSource, SourceError};
pub use types::{Color, Dataset, Event};

pub use logging::init_logging;
