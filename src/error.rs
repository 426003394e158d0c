//! Error types for he3map library

use std::io;
use thiserror::Error;

/// Main error type for he3map operations
#[derive(Debug, Error)]
pub enum MapError {
    /// IO error occurred while writing a record
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Destination buffer too small for the compressor/decompressor output.
    ///
    /// Recovered by the grow-and-retry loop unless a capacity cap is reached.
    #[error("Insufficient output capacity: {capacity} bytes")]
    InsufficientOutputCapacity { capacity: usize },

    /// Back-reference pointing before the start of the output
    #[error("Malformed token at offset {offset}: distance {distance} from output position {position}")]
    MalformedToken {
        offset: usize,
        distance: usize,
        position: usize,
    },

    /// Invalid map header (magic string or dimensions)
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    /// Stream ended in the middle of a field
    #[error("Truncated input at offset {offset} while reading {field}")]
    TruncatedInput { offset: usize, field: &'static str },

    /// Format version outside the documented range
    #[error("Unsupported map format version: {0}")]
    UnsupportedVersion(i32),

    /// Terrain code not in the remap table (strict mode only)
    #[error("Unknown terrain code {code} at offset {offset}")]
    UnknownTerrain { offset: usize, code: u8 },

    /// Transport envelope could not be decoded
    #[error("Envelope error: {0}")]
    Envelope(#[from] base64::DecodeError),

    /// Document cannot be represented in the requested layout
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl MapError {
    /// Whether the grow-and-retry loop may recover from this error.
    pub fn is_capacity(&self) -> bool {
        matches!(self, MapError::InsufficientOutputCapacity { .. })
    }
}

/// Result type alias for he3map operations
pub type Result<T> = std::result::Result<T, MapError>;
