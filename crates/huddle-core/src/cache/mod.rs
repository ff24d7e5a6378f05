//! Event cache with age-based freshness.

pub mod clock;
pub mod errors;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use errors::CacheError;
pub use store::{CacheEntry, CacheLookup, EventCache};
