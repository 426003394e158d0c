//! Version-conditional record layout.
//!
//! The map record has no self-description; which optional fields exist is
//! decided by the format version in the header. Every such decision lives
//! in [`FormatLayout`] so the reader and writer never compare version
//! numbers themselves.

use crate::error::{MapError, Result};

/// Magic string at the start of every record.
pub const HEADER_MAGIC: &str = "hexmap";
/// Version emitted by the writer by default.
pub const CURRENT_FORMAT_VERSION: i32 = 7;
/// Oldest version with a documented layout.
pub const MIN_FORMAT_VERSION: i32 = 1;

/// Smallest possible tile record: height, flags, faction, two presence bytes.
pub const MIN_TILE_SIZE: usize = 4 + 1 + 4 + 1 + 1;
/// Size of the game-state byte that closes the record.
pub const TRAILER_SIZE: usize = 1;

/// Optional-field table for one format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatLayout {
    version: i32,

    /// v5+: five palette bytes after the dimensions
    pub has_style: bool,
    /// v2+: army records carry an artillery unit count
    pub has_artillery_units: bool,
    /// v3+: a present artillery slot is followed by its army record
    pub has_artillery_record: bool,
}

impl FormatLayout {
    /// Layout for `version`; fails for versions outside the documented range.
    pub fn new(version: i32) -> Result<Self> {
        if !(MIN_FORMAT_VERSION..=CURRENT_FORMAT_VERSION).contains(&version) {
            return Err(MapError::UnsupportedVersion(version));
        }
        Ok(Self {
            version,
            has_style: version >= 5,
            has_artillery_units: version > 1,
            has_artillery_record: version >= 3,
        })
    }

    /// Layout of the current writer version.
    pub fn current() -> Self {
        Self {
            version: CURRENT_FORMAT_VERSION,
            has_style: true,
            has_artillery_units: true,
            has_artillery_record: true,
        }
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    /// Bytes taken by one army record.
    pub fn army_size(&self) -> usize {
        if self.has_artillery_units {
            20
        } else {
            16
        }
    }
}
