//! Little-endian field writer for raw map records.

use byteorder::{LittleEndian, WriteBytesExt};
use encoding_rs::Encoding;

use crate::error::{MapError, Result};

/// Longest string a one-byte length prefix can describe.
pub const MAX_STRING_LEN: usize = u8::MAX as usize;

/// Field writer appending to an in-memory buffer.
#[derive(Debug)]
pub struct MapStreamWriter {
    buffer: Vec<u8>,
    encoding: &'static Encoding,
}

impl Default for MapStreamWriter {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl MapStreamWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            encoding: encoding_rs::UTF_8,
        }
    }

    /// Set the text encoding used for strings.
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buffer.write_u8(value)?;
        Ok(())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.buffer.write_i32::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.buffer.write_f32::<LittleEndian>(value)?;
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Write a string with a one-byte length prefix.
    ///
    /// Strings longer than 255 encoded bytes, or with characters the
    /// encoding cannot represent, are rejected.
    pub fn write_string(&mut self, field: &str, value: &str) -> Result<()> {
        let (bytes, _, unmappable) = self.encoding.encode(value);
        if unmappable {
            return Err(MapError::InvalidDocument(format!(
                "{} {:?} cannot be encoded as {}",
                field,
                value,
                self.encoding.name()
            )));
        }
        if bytes.len() > MAX_STRING_LEN {
            return Err(MapError::InvalidDocument(format!(
                "{} is {} bytes long, at most {} fit",
                field,
                bytes.len(),
                MAX_STRING_LEN
            )));
        }
        self.write_u8(bytes.len() as u8)?;
        self.write_bytes(&bytes);
        Ok(())
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}
