//! Stable, content-addressed keys for calendar colors.
//!
//! Each component is hashed on its own with SHA-256 over the big-endian bits
//! of the `f64`, truncated to 8 bytes of hex. The key is the four segments
//! joined with `-`; the first three segments double as nested directories so
//! the icon tree never grows one huge flat directory.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::types::Color;

const SEGMENT_BYTES: usize = 8;
const ICON_EXTENSION: &str = "png";

/// Bits used for hashing. `0.0` and `-0.0` compare equal, so they must hash
/// equal too; every NaN payload collapses to one value.
fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

fn segment(value: f64) -> String {
    let digest = Sha256::digest(canonical_bits(value).to_be_bytes());
    hex::encode(&digest[..SEGMENT_BYTES])
}

fn segments(color: &Color) -> [String; 4] {
    color.components().map(segment)
}

/// Cache key for `color`.
pub fn key_of(color: &Color) -> String {
    segments(color).join("-")
}

/// Icon path relative to the icon root: `s1/s2/s3/<key>.png`.
pub fn relative_path(color: &Color) -> PathBuf {
    let [first, second, third, _] = segments(color);
    let filename = format!("{}.{}", key_of(color), ICON_EXTENSION);
    PathBuf::from(first).join(second).join(third).join(filename)
}

/// Absolute icon path under `root`.
pub fn path_of(root: &Path, color: &Color) -> PathBuf {
    root.join(relative_path(color))
}
