//! Map document structure

use crate::error::{MapError, Result};
use crate::types::{MapStyle, MapTile, TerrainType};
use crate::io::map::layout::CURRENT_FORMAT_VERSION;

/// Neighbour offsets `(dx, dz)` for tiles on odd rows.
const NEIGHBORS_ODD: [(isize, isize); 6] = [(-1, 0), (0, -1), (1, -1), (1, 0), (1, 1), (0, 1)];
/// Neighbour offsets `(dx, dz)` for tiles on even rows.
const NEIGHBORS_EVEN: [(isize, isize); 6] = [(-1, 0), (-1, -1), (0, -1), (1, 0), (0, 1), (-1, 1)];

/// A decoded map: header metadata plus a `width × depth` tile grid.
///
/// Tiles are stored column-major by `x`, matching the on-disk order:
/// index = `x * depth + z`. The grid always holds exactly
/// `width * depth` tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    /// Format version the document was read with (or will be written as)
    pub version: i32,
    pub title: String,
    pub author: String,
    pub style: MapStyle,
    width: usize,
    depth: usize,
    tiles: Vec<MapTile>,
}

impl MapDocument {
    /// Create a map of unowned grass tiles at sea level.
    ///
    /// # Panics
    ///
    /// Panics if `width * depth` overflows `usize`. Use
    /// [`MapDocument::try_new`] for untrusted dimensions.
    pub fn new(width: usize, depth: usize) -> Self {
        match Self::try_new(width, depth) {
            Ok(doc) => doc,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create a map of unowned grass tiles, rejecting dimensions whose tile
    /// count overflows.
    pub fn try_new(width: usize, depth: usize) -> Result<Self> {
        let count = width
            .checked_mul(depth)
            .ok_or_else(|| MapError::InvalidDocument(format!("grid {width}x{depth} overflows")))?;
        Self::from_tiles(width, depth, vec![MapTile::new(0.0, TerrainType::Grass); count])
    }

    /// Create a map from an existing tile grid (index = `x * depth + z`).
    pub fn from_tiles(width: usize, depth: usize, tiles: Vec<MapTile>) -> Result<Self> {
        let expected = width
            .checked_mul(depth)
            .ok_or_else(|| MapError::InvalidDocument(format!("grid {width}x{depth} overflows")))?;
        if tiles.len() != expected {
            return Err(MapError::InvalidDocument(format!(
                "grid {}x{} needs {} tiles, got {}",
                width,
                depth,
                expected,
                tiles.len()
            )));
        }
        Ok(Self {
            version: CURRENT_FORMAT_VERSION,
            title: String::new(),
            author: String::new(),
            style: MapStyle::default(),
            width,
            depth,
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    fn index(&self, x: usize, z: usize) -> Option<usize> {
        (x < self.width && z < self.depth).then(|| x * self.depth + z)
    }

    pub fn tile(&self, x: usize, z: usize) -> Option<&MapTile> {
        self.index(x, z).map(|i| &self.tiles[i])
    }

    pub fn tile_mut(&mut self, x: usize, z: usize) -> Option<&mut MapTile> {
        self.index(x, z).map(move |i| &mut self.tiles[i])
    }

    /// All tiles in on-disk order.
    pub fn tiles(&self) -> &[MapTile] {
        &self.tiles
    }

    /// Iterate tiles with their `(x, z)` coordinates in on-disk order.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (usize, usize, &MapTile)> {
        let depth = self.depth.max(1);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (i / depth, i % depth, tile))
    }

    /// In-bounds hex neighbours of `(x, z)` on the offset grid.
    pub fn neighbors(&self, x: usize, z: usize) -> Vec<(usize, usize)> {
        let offsets = if z % 2 == 1 {
            &NEIGHBORS_ODD
        } else {
            &NEIGHBORS_EVEN
        };
        offsets
            .iter()
            .filter_map(|&(dx, dz)| {
                let nx = x.checked_add_signed(dx)?;
                let nz = z.checked_add_signed(dz)?;
                self.index(nx, nz).map(|_| (nx, nz))
            })
            .collect()
    }

    /// A settlement (town, city or capital) touching at least one sea tile.
    pub fn is_port(&self, x: usize, z: usize) -> bool {
        match self.tile(x, z) {
            Some(tile) if tile.terrain.is_settlement() => self
                .neighbors(x, z)
                .into_iter()
                .any(|(nx, nz)| self.tile(nx, nz).is_some_and(MapTile::is_sea)),
            _ => false,
        }
    }

    /// Number of tiles per terrain type, in internal terrain order.
    pub fn terrain_histogram(&self) -> [usize; 10] {
        let mut counts = [0usize; 10];
        for tile in &self.tiles {
            counts[tile.terrain as usize] += 1;
        }
        counts
    }
}
