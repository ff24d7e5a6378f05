//! Interactive search over the cached events.

pub mod errors;
pub mod filter;
pub mod matcher;
pub mod pipeline;
pub mod types;

pub use errors::QueryError;
pub use filter::EventFilter;
pub use matcher::{FuzzyMatcher, Matcher, rank};
pub use pipeline::QueryPipeline;
pub use types::{QueryResponse, QueryResult, subtitle};
