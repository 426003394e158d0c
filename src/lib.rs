//! # he3map
//!
//! A pure Rust library for reading and writing Hex Empire 3 map files.
//!
//! A map file is a binary record (header, tile grid, armies) compressed
//! with an LZF-style token codec and stored as base64 text.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use he3map::{decode_map, encode_map};
//!
//! let doc = decode_map(&std::fs::read("europe.he3")?)?;
//! println!("{} by {} ({}x{})", doc.title, doc.author, doc.width(), doc.depth());
//!
//! let bytes = encode_map(&doc)?;
//! # Ok::<(), he3map::MapError>(())
//! ```
//!
//! ## Layers
//!
//! - [`io::envelope`]: base64 transport text
//! - [`io::compression`]: LZF token stream with a call-scoped match dictionary
//! - [`io::map`]: version-aware record reader/writer
//! - [`MapDocument`]: the decoded grid of [`MapTile`]s

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod error;
pub mod io;
pub mod notification;
pub mod types;

// Re-export commonly used types
pub use error::{MapError, Result};
pub use types::{Army, ArmySlot, MapStyle, MapTile, TerrainType, TileFlags};

// Re-export document
pub use document::MapDocument;

// Re-export I/O entry points
pub use io::{decode_map, decode_maps, encode_map, raw_compress, raw_decompress};
pub use io::{MapReader, MapReaderConfiguration, MapWriter, MapWriterConfiguration};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
