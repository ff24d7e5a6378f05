//! Cache refresh coordination.
//!
//! One named job, `reload`, moves between idle and running. The interactive
//! path only ever launches it in the background and never waits.

pub mod coordinator;
pub mod errors;

pub use coordinator::{RefreshCoordinator, RefreshOutcome};
pub use errors::RefreshError;
