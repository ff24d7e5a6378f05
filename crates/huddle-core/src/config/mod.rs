//! Configuration types and loading.
//!
//! See [`loading`] for the precedence rules.

pub mod errors;
pub mod loading;
pub mod types;

pub use errors::ConfigError;
pub use loading::{compile_patterns, load_from, load_hierarchy};
pub use types::{Config, ConfigFile};
