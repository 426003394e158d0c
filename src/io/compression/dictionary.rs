//! Match dictionary for the LZF compressor.
//!
//! A single-slot hash table from a 3-byte window to the most recent input
//! position that produced the same hash. Collisions overwrite; there is no
//! chaining. A table belongs to one compression call at a time and is
//! zeroed at the start of each call.

/// log2 of the slot count.
pub const HASH_LOG: u32 = 14;
/// Number of slots.
pub const HASH_SIZE: usize = 1 << HASH_LOG;

/// Pack the first two bytes of a window.
#[inline]
pub fn first_hash(input: &[u8], pos: usize) -> u32 {
    ((input[pos] as u32) << 8) | input[pos + 1] as u32
}

/// Shift the next byte into a window, keeping the last three bytes.
#[inline]
pub fn next_hash(hval: u32, byte: u8) -> u32 {
    ((hval << 8) | byte as u32) & 0x00FF_FFFF
}

/// Hash slot of a 3-byte window.
#[inline]
pub fn hash_slot(hval: u32) -> usize {
    let mixed = (hval ^ (hval << 5)) >> (24 - HASH_LOG);
    (mixed.wrapping_sub(hval.wrapping_mul(5)) as usize) & (HASH_SIZE - 1)
}

/// Hash table of recent input positions.
#[derive(Debug, Clone)]
pub struct MatchDictionary {
    slots: Box<[usize]>,
}

impl MatchDictionary {
    pub fn new() -> Self {
        Self {
            slots: vec![0usize; HASH_SIZE].into_boxed_slice(),
        }
    }

    /// Zero every slot.
    pub fn reset(&mut self) {
        self.slots.fill(0);
    }

    /// Return the position previously stored for `hval` (0 if unset) and
    /// store `pos` in its place.
    #[inline]
    pub fn lookup_and_update(&mut self, hval: u32, pos: usize) -> usize {
        std::mem::replace(&mut self.slots[hash_slot(hval)], pos)
    }

    /// Store `pos` for `hval` without reading the old value.
    #[inline]
    pub fn insert(&mut self, hval: u32, pos: usize) {
        self.slots[hash_slot(hval)] = pos;
    }
}

impl Default for MatchDictionary {
    fn default() -> Self {
        Self::new()
    }
}
