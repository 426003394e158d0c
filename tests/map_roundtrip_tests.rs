//! Whole-map encode/decode through the transport chain.
//!
//!   cargo test --test map_roundtrip_tests

mod common;

use common::builders::{create_mixed_document, DEPTH, WIDTH};
use he3map::notification::NotificationType;
use he3map::{
    decode_map, decode_maps, encode_map, raw_compress, raw_decompress, ArmySlot, MapDocument,
    MapError, MapReader, MapTile, MapWriter, TerrainType,
};

#[test]
fn test_mixed_document_roundtrip() {
    let doc = create_mixed_document();
    let transport = encode_map(&doc).unwrap();
    assert!(transport.iter().all(|b| b.is_ascii_graphic()));

    let mut reader = MapReader::from_transport(&transport);
    let decoded = reader.read().unwrap();
    assert!(reader.notifications().is_empty(), "{:?}", reader.notifications());
    assert_eq!(decoded, doc);
}

#[test]
fn test_roundtrip_preserves_tile_details() {
    let decoded = decode_map(&encode_map(&create_mixed_document()).unwrap()).unwrap();
    assert_eq!((decoded.width(), decoded.depth()), (WIDTH, DEPTH));
    assert_eq!(decoded.version, 7);
    assert_eq!(decoded.title, "Baltic Front");

    let capital = decoded.tile(1, 1).unwrap();
    assert_eq!(capital.terrain, TerrainType::Capital);
    assert_eq!(capital.city_name.as_deref(), Some("Riga"));
    assert!(capital.has_flag && capital.has_road);
    assert_eq!(capital.artillery.army().map(|a| a.artillery), Some(4));

    let city = decoded.tile(4, 0).unwrap();
    assert_eq!(city.city_name.as_deref(), Some("Kaunas Šilainiai"));
    assert_eq!(city.infantry, ArmySlot::Empty);
    assert!(city.artillery.is_present());

    let peak = decoded.tile(5, 3).unwrap();
    assert!(peak.is_mountain());
    assert_eq!(peak.city_name, None);
}

#[test]
fn test_encoding_is_deterministic() {
    let doc = create_mixed_document();
    assert_eq!(encode_map(&doc).unwrap(), encode_map(&doc).unwrap());
}

#[test]
fn test_raw_layer_roundtrip() {
    let doc = create_mixed_document();
    let raw = MapWriter::new().write_raw(&doc).unwrap();
    let transport = raw_compress(&raw).unwrap();
    assert_eq!(raw_decompress(&transport).unwrap(), raw);
    assert_eq!(MapReader::from_raw(&raw).read().unwrap(), doc);
}

#[test]
fn test_empty_grid() {
    let mut doc = MapDocument::new(0, 0);
    doc.title = "void".into();
    let decoded = decode_map(&encode_map(&doc).unwrap()).unwrap();
    assert_eq!(decoded.tile_count(), 0);
    assert_eq!(decoded, doc);
}

#[test]
fn test_transport_whitespace_is_ignored() {
    let doc = create_mixed_document();
    let mut transport = encode_map(&doc).unwrap();
    transport.extend_from_slice(b"\r\n");
    transport.insert(0, b' ');
    assert_eq!(decode_map(&transport).unwrap(), doc);
}

#[test]
fn test_bad_envelope() {
    assert!(matches!(
        decode_map(b"not base64!"),
        Err(MapError::Envelope(_))
    ));
}

#[test]
fn test_unsupported_versions_are_rejected() {
    let raw = MapWriter::new().write_raw(&create_mixed_document()).unwrap();
    // Version follows the length-prefixed magic.
    for version in [0i32, 8, -1, 1000] {
        let mut patched = raw.clone();
        patched[7..11].copy_from_slice(&version.to_le_bytes());
        match MapReader::from_raw(&patched).read() {
            Err(MapError::UnsupportedVersion(v)) => assert_eq!(v, version),
            other => panic!("v{version}: expected UnsupportedVersion, got {other:?}"),
        }
    }
}

#[test]
fn test_truncated_records_fail() {
    let raw = MapWriter::new().write_raw(&create_mixed_document()).unwrap();
    for cut in [0, 3, 10, 30, raw.len() / 2, raw.len() - 1] {
        let result = MapReader::from_raw(&raw[..cut]).read();
        assert!(
            matches!(
                result,
                Err(MapError::TruncatedInput { .. }) | Err(MapError::MalformedHeader(_))
            ),
            "cut at {cut}: {result:?}"
        );
    }
}

#[test]
fn test_invalid_utf8_title_is_replaced_with_warning() {
    let raw = MapWriter::new().write_raw(&create_mixed_document()).unwrap();
    let mut patched = raw.clone();
    // Magic (7) + version (4) + title length (1).
    patched[12] = 0xFF;

    let mut reader = MapReader::from_raw(&patched);
    let doc = reader.read().unwrap();
    assert!(doc.title.starts_with('\u{FFFD}'));
    assert!(doc.title.ends_with("altic Front"));
    assert!(reader.notifications().has_type(NotificationType::Warning));
}

#[test]
fn test_overlong_string_is_rejected_by_writer() {
    let mut doc = create_mixed_document();
    doc.author = "x".repeat(256);
    assert!(matches!(
        encode_map(&doc),
        Err(MapError::InvalidDocument(_))
    ));

    doc.author = "x".repeat(255);
    let decoded = decode_map(&encode_map(&doc).unwrap()).unwrap();
    assert_eq!(decoded.author.len(), 255);
}

#[test]
fn test_urban_tile_with_empty_name() {
    let mut doc = MapDocument::new(2, 2);
    *doc.tile_mut(0, 1).unwrap() = MapTile::new(0.4, TerrainType::Factory);
    let decoded = decode_map(&encode_map(&doc).unwrap()).unwrap();
    assert_eq!(decoded.tile(0, 1).unwrap().city_name.as_deref(), Some(""));
}

#[test]
fn test_ports_and_neighbors() {
    let mut doc = MapDocument::new(3, 3);
    for (x, z) in [(0, 0), (1, 0), (2, 0)] {
        *doc.tile_mut(x, z).unwrap() = MapTile::new(-0.5, TerrainType::Grass);
    }
    for (x, z) in [(0, 1), (1, 1), (2, 1), (0, 2), (1, 2), (2, 2)] {
        *doc.tile_mut(x, z).unwrap() = MapTile::new(0.3, TerrainType::Grass);
    }
    *doc.tile_mut(1, 1).unwrap() = MapTile::with_city(0.3, TerrainType::Town, "Harbor");
    *doc.tile_mut(1, 2).unwrap() = MapTile::with_city(0.3, TerrainType::City, "Inland");
    *doc.tile_mut(0, 1).unwrap() = MapTile::with_city(0.3, TerrainType::Factory, "Docks");

    let decoded = decode_map(&encode_map(&doc).unwrap()).unwrap();
    assert!(decoded.is_port(1, 1));
    assert!(!decoded.is_port(1, 2));
    // Factories are urban but not settlements.
    assert!(!decoded.is_port(0, 1));

    let corner = decoded.neighbors(0, 0);
    assert!(corner.iter().all(|&(x, z)| x < 3 && z < 3));
    assert!(corner.len() < 6);
    assert_eq!(decoded.neighbors(1, 1).len(), 6);
}

#[test]
fn test_decode_maps_in_parallel() {
    let doc = create_mixed_document();
    let good = encode_map(&doc).unwrap();
    let mut small = MapDocument::new(1, 2);
    small.title = "small".into();
    let other = encode_map(&small).unwrap();

    let inputs: Vec<Vec<u8>> = vec![good.clone(), b"@@@".to_vec(), other, good];
    let results = decode_maps(&inputs);
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].as_ref().unwrap(), &doc);
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().title, "small");
    assert_eq!(results[3].as_ref().unwrap(), &doc);
}
