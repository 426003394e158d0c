//! Shared test utilities for he3map integration tests.
//!
//! Test crates import this via `mod common;`.

#![allow(dead_code)]

pub mod builders;

use he3map::{MapDocument, MapWriter};

/// All format versions with a documented layout.
pub const ALL_VERSIONS: [i32; 7] = [1, 2, 3, 4, 5, 6, 7];

/// Deterministic pseudo-random bytes (xorshift32).
pub fn pseudo_random_bytes(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// Text-like data with plenty of repeats.
pub fn repetitive_text(len: usize) -> Vec<u8> {
    b"Hex Empire map: grass, sand, farmland, forest, snow; town city capital. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

/// Raw record of `doc` written at `version`.
pub fn raw_at_version(doc: &MapDocument, version: i32) -> Vec<u8> {
    MapWriter::with_version(version)
        .write_raw(doc)
        .unwrap_or_else(|e| panic!("writing v{version}: {e}"))
}
