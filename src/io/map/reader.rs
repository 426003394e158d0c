//! Map reader, the entry point for decoding map files.
//!
//! # Usage
//!
//! ```rust,ignore
//! use he3map::io::map::MapReader;
//!
//! let mut reader = MapReader::from_transport(&bytes);
//! let doc = reader.read()?;
//! for notification in reader.notifications() {
//!     println!("{notification}");
//! }
//! ```

use encoding_rs::Encoding;
use tracing::debug;

use crate::document::MapDocument;
use crate::error::{MapError, Result};
use crate::io::compression::{BufferPolicy, Decompressor, LzfDecompressor};
use crate::io::envelope;
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::{Army, ArmySlot, MapStyle, MapTile, TerrainType, TileFlags};

use super::layout::{FormatLayout, HEADER_MAGIC, MIN_TILE_SIZE, TRAILER_SIZE};
use super::stream_reader::MapStreamReader;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration options for the map reader.
#[derive(Debug, Clone)]
pub struct MapReaderConfiguration {
    /// Output sizing for decompression. Set `max_capacity` to bound memory
    /// use on untrusted input.
    pub buffer: BufferPolicy,

    /// When `true`, a terrain code outside the remap table fails the read
    /// with [`MapError::UnknownTerrain`]. Otherwise the tile falls back to
    /// grass and a notification is recorded.
    ///
    /// Default: `false`.
    pub strict_terrain: bool,

    /// Text encoding of title, author and city names. Maps saved by
    /// Windows-era editors may use a legacy code page.
    ///
    /// Default: UTF-8.
    pub encoding: &'static Encoding,
}

impl Default for MapReaderConfiguration {
    fn default() -> Self {
        Self {
            buffer: BufferPolicy::default(),
            strict_terrain: false,
            encoding: encoding_rs::UTF_8,
        }
    }
}

// ---------------------------------------------------------------------------
// MapReader
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum MapSource<'a> {
    /// Base64 text wrapping a compressed token stream.
    Transport(&'a [u8]),
    /// An already decompressed record.
    Raw(&'a [u8]),
}

/// Map reader: transport text → token stream → raw record → [`MapDocument`].
///
/// Decoding is all-or-nothing; any fatal error discards the document.
pub struct MapReader<'a> {
    source: MapSource<'a>,
    config: MapReaderConfiguration,
    notifications: NotificationCollection,
}

impl<'a> MapReader<'a> {
    /// Reader over transport bytes as stored in a map file.
    pub fn from_transport(bytes: &'a [u8]) -> Self {
        Self::with_source(MapSource::Transport(bytes))
    }

    /// Reader over a decompressed record.
    pub fn from_raw(bytes: &'a [u8]) -> Self {
        Self::with_source(MapSource::Raw(bytes))
    }

    fn with_source(source: MapSource<'a>) -> Self {
        Self {
            source,
            config: MapReaderConfiguration::default(),
            notifications: NotificationCollection::new(),
        }
    }

    /// Replace the reader configuration.
    pub fn with_configuration(mut self, config: MapReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Notifications collected by the last [`MapReader::read`].
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Strip the envelope and decompress, without structural decoding.
    pub fn read_raw_record(&self) -> Result<Vec<u8>> {
        match self.source {
            MapSource::Transport(bytes) => {
                let tokens = envelope::decode(bytes)?;
                LzfDecompressor::with_policy(self.config.buffer).decompress(&tokens)
            }
            MapSource::Raw(bytes) => Ok(bytes.to_vec()),
        }
    }

    /// Decode the map document.
    pub fn read(&mut self) -> Result<MapDocument> {
        self.notifications.clear();
        match self.source {
            MapSource::Raw(bytes) => self.read_record(bytes),
            MapSource::Transport(_) => {
                let raw = self.read_raw_record()?;
                self.read_record(&raw)
            }
        }
    }

    fn read_record(&mut self, data: &[u8]) -> Result<MapDocument> {
        let mut reader = MapStreamReader::new(data);
        reader.set_encoding(self.config.encoding);

        let (magic, _) = reader.read_string("header")?;
        if magic != HEADER_MAGIC {
            return Err(MapError::MalformedHeader(format!(
                "expected {:?}, found {:?}",
                HEADER_MAGIC, magic
            )));
        }

        let version = reader.read_i32("format version")?;
        let layout = FormatLayout::new(version)?;

        let title = self.read_text(&mut reader, "title")?;
        let author = self.read_text(&mut reader, "author")?;

        let width = reader.read_i32("width")?;
        let depth = reader.read_i32("depth")?;
        let (width, depth) = match (usize::try_from(width), usize::try_from(depth)) {
            (Ok(w), Ok(d)) => (w, d),
            _ => {
                return Err(MapError::MalformedHeader(format!(
                    "negative grid dimensions {}x{}",
                    width, depth
                )))
            }
        };

        let style = if layout.has_style {
            MapStyle::from_bytes(reader.read_array::<5>("style")?)
        } else {
            MapStyle::default()
        };

        let tile_count = Self::check_dimensions(width, depth, reader.remaining())?;
        debug!(version, width, depth, title = %title, "map header");

        // On-disk order is x-major, the same as the document's tile index.
        let mut tiles = Vec::with_capacity(tile_count);
        for _ in 0..tile_count {
            tiles.push(self.read_tile(&mut reader, &layout)?);
        }

        let game_state_offset = reader.position();
        if reader.read_u8("game state")? != 0 {
            self.notifications.notify(
                NotificationType::NotSupported,
                game_state_offset,
                "game state flag set; saved game data is not decoded",
            );
        }
        if reader.remaining() > 0 {
            self.notifications.notify(
                NotificationType::Warning,
                reader.position(),
                format!("{} trailing bytes after the map record", reader.remaining()),
            );
        }

        let mut doc = MapDocument::from_tiles(width, depth, tiles)?;
        doc.version = version;
        doc.title = title;
        doc.author = author;
        doc.style = style;
        Ok(doc)
    }

    /// Reject grids that cannot possibly fit in the rest of the record.
    /// Returns the tile count.
    fn check_dimensions(width: usize, depth: usize, remaining: usize) -> Result<usize> {
        let count = width.checked_mul(depth);
        let needed = count
            .and_then(|n| n.checked_mul(MIN_TILE_SIZE))
            .and_then(|n| n.checked_add(TRAILER_SIZE));
        match (count, needed) {
            (Some(count), Some(needed)) if needed <= remaining => Ok(count),
            (Some(_), Some(needed)) => Err(MapError::MalformedHeader(format!(
                "grid {}x{} needs at least {} bytes, only {} remain",
                width, depth, needed, remaining
            ))),
            _ => Err(MapError::MalformedHeader(format!(
                "grid {}x{} is too large",
                width, depth
            ))),
        }
    }

    fn read_text(&mut self, reader: &mut MapStreamReader<'_>, field: &'static str) -> Result<String> {
        let offset = reader.position();
        let (text, had_errors) = reader.read_string(field)?;
        if had_errors {
            self.notifications.notify(
                NotificationType::Warning,
                offset,
                format!(
                    "{} is not valid {}; invalid sequences replaced",
                    field,
                    self.config.encoding.name()
                ),
            );
        }
        Ok(text)
    }

    fn read_tile(&mut self, reader: &mut MapStreamReader<'_>, layout: &FormatLayout) -> Result<MapTile> {
        let height = reader.read_f32("height")?;

        let flags_offset = reader.position();
        let (flags, code) = TileFlags::split(reader.read_u8("tile flags")?);
        let terrain = match TerrainType::from_wire_code(code) {
            Some(terrain) => terrain,
            None if self.config.strict_terrain => {
                return Err(MapError::UnknownTerrain {
                    offset: flags_offset,
                    code,
                })
            }
            None => {
                self.notifications.notify(
                    NotificationType::Fallback,
                    flags_offset,
                    format!("unknown terrain code {}, using Grass", code),
                );
                TerrainType::Grass
            }
        };

        let city_name = if terrain.is_urban() {
            Some(self.read_text(reader, "city name")?)
        } else {
            None
        };

        let faction = reader.read_i32("faction")?;

        let infantry = if self.read_presence(reader, "infantry presence")? {
            ArmySlot::Present(Self::read_army(reader, layout)?)
        } else {
            ArmySlot::Empty
        };

        let artillery = match self.read_presence(reader, "artillery presence")? {
            true if layout.has_artillery_record => ArmySlot::Present(Self::read_army(reader, layout)?),
            true => ArmySlot::Unrecorded,
            false => ArmySlot::Empty,
        };

        Ok(MapTile {
            height,
            terrain,
            has_road: flags.contains(TileFlags::ROAD),
            has_flag: flags.contains(TileFlags::CAPITAL),
            city_name,
            faction,
            infantry,
            artillery,
        })
    }

    /// Only `1` means present; other non-zero values are treated as absent.
    fn read_presence(&mut self, reader: &mut MapStreamReader<'_>, field: &'static str) -> Result<bool> {
        let offset = reader.position();
        match reader.read_u8(field)? {
            0 => Ok(false),
            1 => Ok(true),
            other => {
                self.notifications.notify(
                    NotificationType::Warning,
                    offset,
                    format!("{} byte is {}, treating as absent", field, other),
                );
                Ok(false)
            }
        }
    }

    fn read_army(reader: &mut MapStreamReader<'_>, layout: &FormatLayout) -> Result<Army> {
        let x = reader.read_i32("army x")?;
        let y = reader.read_i32("army y")?;
        let infantry = reader.read_i32("infantry units")?;
        let artillery = if layout.has_artillery_units {
            reader.read_i32("artillery units")?
        } else {
            0
        };
        let morale = reader.read_f32("morale")?;
        Ok(Army::new(x, y, infantry, artillery, morale))
    }
}
