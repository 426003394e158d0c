//! LZF token stream compression and decompression.
//!
//! A token stream is a sequence of control bytes, each starting either a
//! literal run or a back-reference:
//!
//! ```text
//! 000LLLLL  <L+1 bytes>            literal run, 1..=32 bytes
//! LLLOOOOO  OOOOOOOO               back-reference, L in 1..=6
//! 111OOOOO  LLLLLLLL  OOOOOOOO     back-reference, length field 7 + next byte
//! ```
//!
//! A back-reference copies `L + 2` bytes starting `offset + 1` bytes behind
//! the output cursor. Source and destination may overlap, so the copy runs
//! byte by byte in increasing order.

use tracing::debug;

use super::dictionary::{first_hash, next_hash, MatchDictionary};
use super::{grow_and_retry, BufferPolicy};
use crate::error::{MapError, Result};

/// Longest literal run per control byte.
pub const MAX_LITERAL: usize = 1 << 5;
/// Back-references reach at most this far (exclusive).
pub const MAX_OFFSET: usize = 1 << 13;
/// Longest back-reference.
pub const MAX_REFERENCE: usize = (1 << 8) + (1 << 3);

/// Bounds-checked cursor over a caller-provided output buffer.
struct TokenSink<'a> {
    out: &'a mut [u8],
    pos: usize,
}

impl<'a> TokenSink<'a> {
    fn new(out: &'a mut [u8]) -> Self {
        Self { out, pos: 0 }
    }

    fn reserve(&self, needed: usize) -> Result<()> {
        if self.pos + needed > self.out.len() {
            return Err(MapError::InsufficientOutputCapacity {
                capacity: self.out.len(),
            });
        }
        Ok(())
    }

    fn push(&mut self, byte: u8) {
        self.out[self.pos] = byte;
        self.pos += 1;
    }

    fn extend(&mut self, bytes: &[u8]) {
        self.out[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    /// Emit the literal run `bytes` (1..=32 bytes).
    fn literal_run(&mut self, bytes: &[u8]) {
        self.push((bytes.len() - 1) as u8);
        self.extend(bytes);
    }
}

/// Size of a back-reference token for a match of `len` bytes.
fn reference_token_size(len: usize) -> usize {
    if len - 2 < 7 {
        2
    } else {
        3
    }
}

/// Compress `input` into `output`, returning the number of bytes written.
///
/// Fails with [`MapError::InsufficientOutputCapacity`] when `output` cannot
/// hold the whole token stream; an output exactly as long as the stream
/// always succeeds. `dict` is reset before use.
pub fn compress_into(input: &[u8], output: &mut [u8], dict: &mut MatchDictionary) -> Result<usize> {
    dict.reset();

    let in_len = input.len();
    let mut sink = TokenSink::new(output);
    let mut ip = 0usize;
    // Pending literals are input[ip - lit..ip].
    let mut lit = 0usize;
    let mut hval = if in_len >= 2 { first_hash(input, 0) } else { 0 };

    loop {
        if ip + 2 < in_len {
            hval = next_hash(hval, input[ip + 2]);
            let reference = dict.lookup_and_update(hval, ip);

            if reference > 0
                && ip - reference - 1 < MAX_OFFSET
                && ip + 4 < in_len
                && input[reference..reference + 3] == input[ip..ip + 3]
            {
                let offset = ip - reference - 1;
                let max_len = (in_len - ip - 2).min(MAX_REFERENCE);
                let mut len = 2;
                loop {
                    len += 1;
                    if len >= max_len || input[reference + len] != input[ip + len] {
                        break;
                    }
                }

                let literal_size = if lit > 0 { lit + 1 } else { 0 };
                sink.reserve(literal_size + reference_token_size(len))?;

                if lit > 0 {
                    sink.literal_run(&input[ip - lit..ip]);
                    lit = 0;
                }

                let field = len - 2;
                if field < 7 {
                    sink.push(((offset >> 8) + (field << 5)) as u8);
                } else {
                    sink.push(((offset >> 8) + (7 << 5)) as u8);
                    sink.push((field - 7) as u8);
                }
                sink.push(offset as u8);

                // Re-prime the hash on the last two positions of the match so
                // later references can point inside it.
                ip += field;
                hval = next_hash(first_hash(input, ip), input[ip + 2]);
                dict.insert(hval, ip);
                ip += 1;
                hval = next_hash(hval, input[ip + 2]);
                dict.insert(hval, ip);
                ip += 1;
                continue;
            }
        } else if ip == in_len {
            break;
        }

        lit += 1;
        ip += 1;

        if lit == MAX_LITERAL {
            sink.reserve(1 + MAX_LITERAL)?;
            sink.literal_run(&input[ip - lit..ip]);
            lit = 0;
        }
    }

    if lit > 0 {
        sink.reserve(lit + 1)?;
        sink.literal_run(&input[ip - lit..ip]);
    }

    Ok(sink.pos)
}

/// Expand the token stream `input` into `output`, returning the number of
/// bytes produced.
///
/// Fails with [`MapError::InsufficientOutputCapacity`] when `output` is too
/// small, [`MapError::TruncatedInput`] when a token is cut short, and
/// [`MapError::MalformedToken`] when a back-reference points before the
/// start of the output.
pub fn decompress_into(input: &[u8], output: &mut [u8]) -> Result<usize> {
    let mut ip = 0usize;
    let mut op = 0usize;

    let read = |ip: &mut usize, field: &'static str| -> Result<u8> {
        let byte = *input
            .get(*ip)
            .ok_or(MapError::TruncatedInput { offset: *ip, field })?;
        *ip += 1;
        Ok(byte)
    };

    while ip < input.len() {
        let token_start = ip;
        let ctrl = read(&mut ip, "control byte")? as usize;

        if ctrl < MAX_LITERAL {
            let run = ctrl + 1;
            if ip + run > input.len() {
                return Err(MapError::TruncatedInput {
                    offset: ip,
                    field: "literal run",
                });
            }
            if op + run > output.len() {
                return Err(MapError::InsufficientOutputCapacity {
                    capacity: output.len(),
                });
            }
            output[op..op + run].copy_from_slice(&input[ip..ip + run]);
            ip += run;
            op += run;
        } else {
            let mut len = ctrl >> 5;
            if len == 7 {
                len += read(&mut ip, "reference length")? as usize;
            }
            let distance = ((ctrl & 0x1F) << 8) | read(&mut ip, "reference offset")? as usize;
            let src = op
                .checked_sub(distance + 1)
                .ok_or(MapError::MalformedToken {
                    offset: token_start,
                    distance,
                    position: op,
                })?;

            let count = len + 2;
            if op + count > output.len() {
                return Err(MapError::InsufficientOutputCapacity {
                    capacity: output.len(),
                });
            }
            for i in 0..count {
                output[op + i] = output[src + i];
            }
            op += count;
        }
    }

    Ok(op)
}

/// LZF compressor with a grow-and-retry output buffer.
///
/// Each call uses its own [`MatchDictionary`], so one compressor can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct LzfCompressor {
    pub policy: BufferPolicy,
}

impl LzfCompressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: BufferPolicy) -> Self {
        Self { policy }
    }

    /// Compress using a caller-owned dictionary.
    pub fn compress_with(&self, source: &[u8], dict: &mut MatchDictionary) -> Result<Vec<u8>> {
        let compressed = grow_and_retry(&self.policy, source.len(), |out| {
            compress_into(source, out, dict)
        })?;
        debug!(
            input = source.len(),
            output = compressed.len(),
            "lzf compress"
        );
        Ok(compressed)
    }
}

impl super::Compressor for LzfCompressor {
    fn compress(&self, source: &[u8]) -> Result<Vec<u8>> {
        let mut dict = MatchDictionary::new();
        self.compress_with(source, &mut dict)
    }
}

/// LZF decompressor with a grow-and-retry output buffer.
#[derive(Debug, Clone, Default)]
pub struct LzfDecompressor {
    pub policy: BufferPolicy,
}

impl LzfDecompressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: BufferPolicy) -> Self {
        Self { policy }
    }
}

impl super::Decompressor for LzfDecompressor {
    fn decompress(&self, source: &[u8]) -> Result<Vec<u8>> {
        let raw = grow_and_retry(&self.policy, source.len(), |out| {
            decompress_into(source, out)
        })?;
        debug!(input = source.len(), output = raw.len(), "lzf decompress");
        Ok(raw)
    }
}
