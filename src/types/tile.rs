//! Map tiles and palette style

use super::army::ArmySlot;
use super::terrain::TerrainType;

/// Height at or above which a tile renders as mountain.
pub const ELEVATION_MOUNTAIN: f32 = 0.6;

/// Palette selectors for the map. Opaque to this library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapStyle {
    pub grass: u8,
    pub mountains: u8,
    pub desert: u8,
    pub sea: u8,
    pub light: u8,
}

impl MapStyle {
    pub fn to_bytes(self) -> [u8; 5] {
        [self.grass, self.mountains, self.desert, self.sea, self.light]
    }

    pub fn from_bytes(bytes: [u8; 5]) -> Self {
        Self {
            grass: bytes[0],
            mountains: bytes[1],
            desert: bytes[2],
            sea: bytes[3],
            light: bytes[4],
        }
    }
}

/// A single hex tile.
///
/// `city_name` is `Some` exactly when the terrain is urban; use
/// [`MapTile::set_terrain`] to keep that in sync.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapTile {
    pub height: f32,
    pub terrain: TerrainType,
    pub has_road: bool,
    /// Capital marker
    pub has_flag: bool,
    pub city_name: Option<String>,
    /// Owning faction; negative means unowned.
    pub faction: i32,
    pub infantry: ArmySlot,
    pub artillery: ArmySlot,
}

impl MapTile {
    /// Create an unowned tile with the given height and terrain.
    pub fn new(height: f32, terrain: TerrainType) -> Self {
        Self {
            height,
            terrain,
            city_name: terrain.is_urban().then(String::new),
            faction: -1,
            ..Default::default()
        }
    }

    /// Create an urban tile with a name. Non-urban terrain drops the name.
    pub fn with_city(height: f32, terrain: TerrainType, name: impl Into<String>) -> Self {
        let mut tile = Self::new(height, terrain);
        if terrain.is_urban() {
            tile.city_name = Some(name.into());
        }
        tile
    }

    /// Change the terrain, adding or dropping the city name as needed.
    pub fn set_terrain(&mut self, terrain: TerrainType) {
        self.terrain = terrain;
        match (terrain.is_urban(), self.city_name.is_some()) {
            (true, false) => self.city_name = Some(String::new()),
            (false, true) => self.city_name = None,
            _ => {}
        }
    }

    pub fn is_sea(&self) -> bool {
        self.height <= 0.0
    }

    pub fn is_mountain(&self) -> bool {
        self.height >= ELEVATION_MOUNTAIN
    }

    pub fn is_owned(&self) -> bool {
        self.faction >= 0
    }
}
