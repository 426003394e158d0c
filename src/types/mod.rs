//! Core value types of a map document

pub mod army;
pub mod terrain;
pub mod tile;

pub use army::{Army, ArmySlot};
pub use terrain::{TerrainType, TileFlags};
pub use tile::{MapStyle, MapTile, ELEVATION_MOUNTAIN};
