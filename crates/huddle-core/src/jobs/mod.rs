//! Named background jobs tracked across processes.

pub mod errors;
pub mod pid_file;
pub mod registry;

pub use errors::JobError;
pub use registry::{JobRegistry, PidJobRegistry};

/// The only job huddle runs: refreshing the event cache.
pub const RELOAD_JOB: &str = "reload";
