//! Little-endian field reader over a raw map record.
//!
//! Every read names the field it is after, so a short record reports
//! exactly where and what was cut off.

use std::io::{self, Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::Encoding;

use crate::error::{MapError, Result};

/// Field reader over a byte slice.
pub struct MapStreamReader<'a> {
    stream: Cursor<&'a [u8]>,
    encoding: &'static Encoding,
}

impl<'a> MapStreamReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            stream: Cursor::new(data),
            encoding: encoding_rs::UTF_8,
        }
    }

    /// Set the text encoding used for strings.
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.stream.position() as usize
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.stream.get_ref().len().saturating_sub(self.position())
    }

    /// Run `read` and translate end-of-stream into [`MapError::TruncatedInput`]
    /// at the offset where the field started.
    fn field<T>(
        &mut self,
        field: &'static str,
        read: impl FnOnce(&mut Cursor<&'a [u8]>) -> io::Result<T>,
    ) -> Result<T> {
        let offset = self.position();
        read(&mut self.stream).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => MapError::TruncatedInput { offset, field },
            _ => MapError::Io(e),
        })
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        self.field(field, |s| s.read_u8())
    }

    pub fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        self.field(field, |s| s.read_i32::<LittleEndian>())
    }

    pub fn read_f32(&mut self, field: &'static str) -> Result<f32> {
        self.field(field, |s| s.read_f32::<LittleEndian>())
    }

    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        self.field(field, |s| {
            let mut buf = [0u8; N];
            s.read_exact(&mut buf)?;
            Ok(buf)
        })
    }

    /// Read a string with a one-byte length prefix.
    ///
    /// Returns the text and whether malformed sequences had to be replaced.
    pub fn read_string(&mut self, field: &'static str) -> Result<(String, bool)> {
        let encoding = self.encoding;
        self.field(field, |s| {
            let len = s.read_u8()? as usize;
            let mut bytes = vec![0u8; len];
            s.read_exact(&mut bytes)?;
            let (text, had_errors) = encoding.decode_without_bom_handling(&bytes);
            Ok((text.into_owned(), had_errors))
        })
    }
}
