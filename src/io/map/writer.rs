//! Map writer: encodes a [`MapDocument`] into a raw record and transport text.

use encoding_rs::Encoding;
use tracing::debug;

use crate::document::MapDocument;
use crate::error::{MapError, Result};
use crate::io::compression::{BufferPolicy, Compressor, LzfCompressor};
use crate::io::envelope;
use crate::types::{Army, ArmySlot, MapTile, TileFlags};

use super::layout::{FormatLayout, CURRENT_FORMAT_VERSION, HEADER_MAGIC, MIN_TILE_SIZE};
use super::stream_writer::MapStreamWriter;

/// Configuration options for the map writer.
#[derive(Debug, Clone)]
pub struct MapWriterConfiguration {
    /// Format version to emit. Versions below the current one drop the
    /// fields their layout lacks.
    ///
    /// Default: [`CURRENT_FORMAT_VERSION`].
    pub version: i32,

    /// Output sizing for compression.
    pub buffer: BufferPolicy,

    /// Text encoding for title, author and city names.
    ///
    /// Default: UTF-8.
    pub encoding: &'static Encoding,
}

impl Default for MapWriterConfiguration {
    fn default() -> Self {
        Self {
            version: CURRENT_FORMAT_VERSION,
            buffer: BufferPolicy::default(),
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Map writer.
///
/// `MapDocument::version` is not consulted; the emitted version comes from
/// the configuration.
#[derive(Debug, Clone, Default)]
pub struct MapWriter {
    config: MapWriterConfiguration,
}

impl MapWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configuration(config: MapWriterConfiguration) -> Self {
        Self { config }
    }

    /// Writer for a specific format version.
    pub fn with_version(version: i32) -> Self {
        Self::with_configuration(MapWriterConfiguration {
            version,
            ..Default::default()
        })
    }

    /// Encode into transport text (record → compressed → base64).
    pub fn write(&self, doc: &MapDocument) -> Result<Vec<u8>> {
        let raw = self.write_raw(doc)?;
        let tokens = LzfCompressor::with_policy(self.config.buffer).compress(&raw)?;
        Ok(envelope::encode(&tokens))
    }

    /// Encode into an uncompressed record.
    pub fn write_raw(&self, doc: &MapDocument) -> Result<Vec<u8>> {
        let layout = FormatLayout::new(self.config.version)?;
        let mut w = MapStreamWriter::with_capacity(64 + doc.tile_count() * MIN_TILE_SIZE);
        w.set_encoding(self.config.encoding);

        w.write_string("header", HEADER_MAGIC)?;
        w.write_i32(layout.version())?;
        w.write_string("title", &doc.title)?;
        w.write_string("author", &doc.author)?;
        w.write_i32(Self::dimension("width", doc.width())?)?;
        w.write_i32(Self::dimension("depth", doc.depth())?)?;
        if layout.has_style {
            w.write_bytes(&doc.style.to_bytes());
        }

        for (x, z, tile) in doc.iter_tiles() {
            Self::write_tile(&mut w, &layout, tile)
                .map_err(|e| Self::at_tile(e, x, z))?;
        }

        // Game state: never written.
        w.write_bool(false)?;

        debug!(
            version = layout.version(),
            width = doc.width(),
            depth = doc.depth(),
            bytes = w.len(),
            "map record written"
        );
        Ok(w.into_inner())
    }

    fn dimension(field: &str, value: usize) -> Result<i32> {
        i32::try_from(value)
            .map_err(|_| MapError::InvalidDocument(format!("{} {} does not fit in i32", field, value)))
    }

    fn at_tile(err: MapError, x: usize, z: usize) -> MapError {
        match err {
            MapError::InvalidDocument(msg) => {
                MapError::InvalidDocument(format!("tile ({}, {}): {}", x, z, msg))
            }
            other => other,
        }
    }

    fn write_tile(w: &mut MapStreamWriter, layout: &FormatLayout, tile: &MapTile) -> Result<()> {
        w.write_f32(tile.height)?;

        let mut flags = TileFlags::empty();
        flags.set(TileFlags::ROAD, tile.has_road);
        flags.set(TileFlags::CAPITAL, tile.has_flag);
        w.write_u8(flags.pack(tile.terrain))?;

        match (&tile.city_name, tile.terrain.is_urban()) {
            (Some(name), true) => w.write_string("city name", name)?,
            (None, false) => {}
            (Some(_), false) => {
                return Err(MapError::InvalidDocument(format!(
                    "{} tile cannot carry a city name",
                    tile.terrain
                )))
            }
            (None, true) => {
                return Err(MapError::InvalidDocument(format!(
                    "{} tile needs a city name",
                    tile.terrain
                )))
            }
        }

        w.write_i32(tile.faction)?;

        match &tile.infantry {
            ArmySlot::Empty => w.write_bool(false)?,
            ArmySlot::Present(army) => {
                w.write_bool(true)?;
                Self::write_army(w, layout, army)?;
            }
            ArmySlot::Unrecorded => {
                return Err(MapError::InvalidDocument(
                    "infantry slot has no army record".into(),
                ))
            }
        }

        match &tile.artillery {
            ArmySlot::Empty => w.write_bool(false)?,
            ArmySlot::Present(army) => {
                w.write_bool(true)?;
                if layout.has_artillery_record {
                    Self::write_army(w, layout, army)?;
                }
            }
            // Nothing to write behind the presence byte, so newer layouts
            // store it as absent.
            ArmySlot::Unrecorded if layout.has_artillery_record => {
                debug!(
                    version = layout.version(),
                    "unrecorded artillery written as absent"
                );
                w.write_bool(false)?
            }
            ArmySlot::Unrecorded => w.write_bool(true)?,
        }

        Ok(())
    }

    fn write_army(w: &mut MapStreamWriter, layout: &FormatLayout, army: &Army) -> Result<()> {
        w.write_i32(army.x)?;
        w.write_i32(army.y)?;
        w.write_i32(army.infantry)?;
        if layout.has_artillery_units {
            w.write_i32(army.artillery)?;
        }
        w.write_f32(army.morale)?;
        Ok(())
    }
}
