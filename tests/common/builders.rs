//! Test document builders.
//!
//! `create_mixed_document()` is the canonical fixture: every terrain type,
//! named urban tiles, a tile with both armies, tiles with one or none.

#![allow(dead_code)]

use he3map::{Army, ArmySlot, MapDocument, MapStyle, MapTile, TerrainType};

pub const WIDTH: usize = 6;
pub const DEPTH: usize = 4;

/// A 6x4 map touching every feature of the current record layout.
pub fn create_mixed_document() -> MapDocument {
    let mut doc = MapDocument::new(WIDTH, DEPTH);
    doc.title = "Baltic Front".into();
    doc.author = "cartographer".into();
    doc.style = MapStyle {
        grass: 2,
        mountains: 1,
        desert: 0,
        sea: 3,
        light: 4,
    };

    // Cycle through every terrain variant.
    for (i, (x, z)) in (0..WIDTH)
        .flat_map(|x| (0..DEPTH).map(move |z| (x, z)))
        .enumerate()
    {
        let terrain = TerrainType::ALL[i % TerrainType::ALL.len()];
        let height = (i as f32 * 0.07) - 0.2;
        let tile = doc.tile_mut(x, z).unwrap();
        *tile = MapTile::new(height, terrain);
        if terrain.is_urban() {
            tile.city_name = Some(format!("{} {}", terrain, i));
        }
    }

    // Named capital with both armies.
    let capital = doc.tile_mut(1, 1).unwrap();
    *capital = MapTile::with_city(0.35, TerrainType::Capital, "Riga");
    capital.has_flag = true;
    capital.has_road = true;
    capital.faction = 0;
    capital.infantry = ArmySlot::Present(Army::new(1, 1, 12, 0, 0.9));
    capital.artillery = ArmySlot::Present(Army::new(1, 1, 0, 4, 0.75));

    // Airport with infantry only.
    let airport = doc.tile_mut(2, 3).unwrap();
    *airport = MapTile::with_city(0.2, TerrainType::Airport, "Tallinn Field");
    airport.faction = 3;
    airport.infantry = ArmySlot::Present(Army::new(2, 3, 5, 1, 0.5));

    // City with artillery only, owned, accented name.
    let city = doc.tile_mut(4, 0).unwrap();
    *city = MapTile::with_city(0.1, TerrainType::City, "Kaunas Šilainiai");
    city.faction = 1;
    city.has_road = true;
    city.artillery = ArmySlot::Present(Army::new(4, 0, 0, 7, 1.0));

    // Mountain, no armies.
    let peak = doc.tile_mut(5, 3).unwrap();
    *peak = MapTile::new(0.8, TerrainType::Snow);

    doc
}

/// A single-tile map holding both armies, for version-gating tests.
pub fn create_single_garrison(version: i32) -> MapDocument {
    let mut doc = MapDocument::new(1, 1);
    doc.version = version;
    doc.title = "garrison".into();
    let tile = doc.tile_mut(0, 0).unwrap();
    *tile = MapTile::with_city(0.3, TerrainType::Town, "Fort");
    tile.faction = 2;
    tile.infantry = ArmySlot::Present(Army::new(0, 0, 8, 3, 0.6));
    tile.artillery = ArmySlot::Present(Army::new(0, 0, 1, 6, 0.4));
    doc
}
