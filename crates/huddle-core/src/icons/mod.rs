//! Calendar-colored icons.
//!
//! [`key`] maps a color onto a stable path, [`IconCache`] looks icons up
//! without side effects or renders them on demand through an
//! [`IconRenderer`].

pub mod cache;
pub mod errors;
pub mod key;
pub mod render;

pub use cache::{IconBatch, IconCache};
pub use errors::IconError;
pub use key::{key_of, path_of, relative_path};
pub use render::{IconRenderer, MaskRenderer};
