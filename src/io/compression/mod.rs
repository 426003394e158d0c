//! LZF compression for map records.
//!
//! - [`dictionary`]: the call-scoped hash table used to find matches
//! - [`lzf`]: token stream encoder/decoder over fixed buffers, plus the
//!   growable [`LzfCompressor`] / [`LzfDecompressor`]

pub mod dictionary;
pub mod lzf;

pub use dictionary::MatchDictionary;
pub use lzf::{compress_into, decompress_into, LzfCompressor, LzfDecompressor};

use tracing::trace;

use crate::error::{MapError, Result};

/// Smallest buffer the grow-and-retry loop starts with.
pub const MIN_CAPACITY: usize = 64;

/// Trait for compressing data.
pub trait Compressor {
    /// Compress a whole source buffer.
    fn compress(&self, source: &[u8]) -> Result<Vec<u8>>;
}

/// Trait for decompressing data.
pub trait Decompressor {
    /// Decompress a whole token stream.
    fn decompress(&self, source: &[u8]) -> Result<Vec<u8>>;
}

/// Output buffer sizing for the grow-and-retry loop.
///
/// The first attempt uses `initial_capacity` (default: twice the input
/// length, at least [`MIN_CAPACITY`]). Each capacity failure doubles the
/// buffer. With `max_capacity` set, hitting the cap surfaces
/// [`MapError::InsufficientOutputCapacity`] instead of growing further.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferPolicy {
    pub initial_capacity: Option<usize>,
    pub max_capacity: Option<usize>,
}

impl BufferPolicy {
    /// Unbounded growth starting from the default size.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Growth capped at `max` bytes.
    pub fn capped(max: usize) -> Self {
        Self {
            initial_capacity: None,
            max_capacity: Some(max),
        }
    }

    fn first_capacity(&self, input_len: usize) -> usize {
        let capacity = self
            .initial_capacity
            .unwrap_or_else(|| input_len.saturating_mul(2).max(MIN_CAPACITY));
        match self.max_capacity {
            Some(max) => capacity.min(max),
            None => capacity,
        }
    }
}

/// Run `attempt` against progressively larger buffers until it stops
/// reporting insufficient capacity. Any other error is returned as is.
pub fn grow_and_retry<F>(policy: &BufferPolicy, input_len: usize, mut attempt: F) -> Result<Vec<u8>>
where
    F: FnMut(&mut [u8]) -> Result<usize>,
{
    let mut capacity = policy.first_capacity(input_len);
    loop {
        let mut buffer = vec![0u8; capacity];
        match attempt(&mut buffer) {
            Ok(written) => {
                buffer.truncate(written);
                return Ok(buffer);
            }
            Err(err) if err.is_capacity() => {
                let next = capacity.saturating_mul(2).max(1);
                let next = match policy.max_capacity {
                    Some(max) if capacity >= max => {
                        return Err(MapError::InsufficientOutputCapacity { capacity })
                    }
                    Some(max) => next.min(max),
                    None => next,
                };
                trace!(capacity, next, "output buffer too small, growing");
                capacity = next;
            }
            Err(err) => return Err(err),
        }
    }
}
