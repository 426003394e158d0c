//! Map record reader/writer.
//!
//! # Module Structure
//!
//! - [`layout`]: header magic, version range, version-conditional field table
//! - [`stream_reader`]: little-endian field reader with truncation context
//! - [`stream_writer`]: little-endian field writer
//! - [`reader`]: [`MapReader`], transport/raw bytes → [`MapDocument`](crate::MapDocument)
//! - [`writer`]: [`MapWriter`], [`MapDocument`](crate::MapDocument) → raw/transport bytes

pub mod layout;
pub mod reader;
pub mod stream_reader;
pub mod stream_writer;
pub mod writer;

pub use layout::{FormatLayout, CURRENT_FORMAT_VERSION, HEADER_MAGIC, MIN_FORMAT_VERSION};
pub use reader::{MapReader, MapReaderConfiguration};
pub use writer::{MapWriter, MapWriterConfiguration};
