//! Base64 transport envelope around the compressed token stream.
//!
//! Map files store the token stream as standard-alphabet base64 with
//! padding. Surrounding ASCII whitespace (a trailing newline is common) is
//! ignored on decode.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::Result;

/// Encode raw bytes into transport text.
pub fn encode(data: &[u8]) -> Vec<u8> {
    STANDARD.encode(data).into_bytes()
}

/// Decode transport text back into raw bytes.
pub fn decode(text: &[u8]) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(text.trim_ascii())?)
}
