//! Terrain types and the tile flags byte

use bitflags::bitflags;
use std::fmt;

/// Terrain of a map tile.
///
/// Variants are listed in internal order; the on-disk code differs and goes
/// through [`TerrainType::wire_code`] / [`TerrainType::from_wire_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum TerrainType {
    #[default]
    Grass = 0,
    Sand,
    Farmland,
    Forest,
    Snow,
    Airport,
    Factory,
    Town,
    City,
    Capital,
}

/// Wire code for each terrain, indexed by internal order.
const WIRE_CODES: [u8; 10] = [0, 1, 2, 3, 4, 9, 5, 6, 7, 8];

impl TerrainType {
    /// Every terrain in internal order.
    pub const ALL: [TerrainType; 10] = [
        TerrainType::Grass,
        TerrainType::Sand,
        TerrainType::Farmland,
        TerrainType::Forest,
        TerrainType::Snow,
        TerrainType::Airport,
        TerrainType::Factory,
        TerrainType::Town,
        TerrainType::City,
        TerrainType::Capital,
    ];

    /// On-disk code for this terrain.
    pub fn wire_code(self) -> u8 {
        WIRE_CODES[self as usize]
    }

    /// Reverse lookup of an on-disk code. `None` for codes outside the table.
    pub fn from_wire_code(code: u8) -> Option<Self> {
        WIRE_CODES
            .iter()
            .position(|&c| c == code)
            .map(|index| Self::ALL[index])
    }

    /// Urban tiles carry a city name on disk.
    pub fn is_urban(self) -> bool {
        self >= TerrainType::Airport
    }

    /// Settlements that count as ports when adjacent to sea.
    pub fn is_settlement(self) -> bool {
        self >= TerrainType::Town
    }

    pub fn name(self) -> &'static str {
        match self {
            TerrainType::Grass => "Grass",
            TerrainType::Sand => "Sand",
            TerrainType::Farmland => "Farmland",
            TerrainType::Forest => "Forest",
            TerrainType::Snow => "Snow",
            TerrainType::Airport => "Airport",
            TerrainType::Factory => "Factory",
            TerrainType::Town => "Town",
            TerrainType::City => "City",
            TerrainType::Capital => "Capital",
        }
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Flag bits sharing the tile byte with the terrain code.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TileFlags: u8 {
        /// Tile has a road.
        const ROAD = 64;
        /// Tile carries a capital flag.
        const CAPITAL = 128;
    }
}

impl TileFlags {
    /// Bits left for the terrain code.
    pub const TERRAIN_MASK: u8 = 0x3F;

    /// Split a tile byte into its flags and the remaining terrain code.
    pub fn split(byte: u8) -> (TileFlags, u8) {
        (
            TileFlags::from_bits_truncate(byte),
            byte & Self::TERRAIN_MASK,
        )
    }

    /// Combine flags with a terrain code into one tile byte.
    pub fn pack(self, terrain: TerrainType) -> u8 {
        terrain.wire_code() | self.bits()
    }
}
