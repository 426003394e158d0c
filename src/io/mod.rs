//! I/O module: compression, transport envelope and the map record codec.
//!
//! Decode: transport text → [`envelope`] → token stream → [`compression`]
//! → raw record → [`map`] → [`MapDocument`]. Encode runs the same chain
//! backwards.

pub mod compression;
pub mod envelope;
pub mod map;

pub use map::{MapReader, MapReaderConfiguration, MapWriter, MapWriterConfiguration};

use rayon::prelude::*;

use crate::document::MapDocument;
use crate::error::Result;
use compression::{Compressor, LzfCompressor};

/// Encode a document as transport text, using the current format version.
pub fn encode_map(doc: &MapDocument) -> Result<Vec<u8>> {
    MapWriter::new().write(doc)
}

/// Decode transport text into a document.
pub fn decode_map(transport: &[u8]) -> Result<MapDocument> {
    MapReader::from_transport(transport).read()
}

/// Strip the envelope and decompress, returning the raw record.
pub fn raw_decompress(transport: &[u8]) -> Result<Vec<u8>> {
    MapReader::from_transport(transport).read_raw_record()
}

/// Compress a raw record and wrap it as transport text.
pub fn raw_compress(raw: &[u8]) -> Result<Vec<u8>> {
    let tokens = LzfCompressor::new().compress(raw)?;
    Ok(envelope::encode(&tokens))
}

/// Decode several independent transports in parallel.
///
/// Results are returned in input order; one failing input does not affect
/// the others.
pub fn decode_maps<T>(inputs: &[T]) -> Vec<Result<MapDocument>>
where
    T: AsRef<[u8]> + Sync,
{
    inputs
        .par_iter()
        .map(|input| decode_map(input.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapError;

    #[test]
    fn test_raw_roundtrip() {
        let raw = b"\x06hexmap and some more bytes, hexmap hexmap".to_vec();
        let transport = raw_compress(&raw).unwrap();
        assert!(transport.iter().all(|b| b.is_ascii()));
        assert_eq!(raw_decompress(&transport).unwrap(), raw);
    }

    #[test]
    fn test_decode_map_rejects_bad_envelope() {
        assert!(matches!(decode_map(b"%%%"), Err(MapError::Envelope(_))));
    }

    #[test]
    fn test_decode_maps_keeps_order() {
        let mut a = MapDocument::new(1, 2);
        a.title = "a".into();
        let mut b = MapDocument::new(2, 1);
        b.title = "b".into();
        let inputs = vec![
            encode_map(&a).unwrap(),
            b"garbage".to_vec(),
            encode_map(&b).unwrap(),
        ];

        let results = decode_maps(&inputs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &a);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap(), &b);
    }
}
