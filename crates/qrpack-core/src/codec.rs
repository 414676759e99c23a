//! Payload codec — raw bytes to fragment text and back.
//!
//! Three schemes: uppercase hex, plain base-32, and deflate-then-base-32.
//! The deflate stream is raw (no zlib header or trailer) with a 10-bit
//! window — part of the wire format, so both directions pin it explicitly.
//!
//! Each scheme reports its alignment granularity: the number of characters
//! that form one indivisible symbol group. Fragment boundaries must fall on
//! these, otherwise a receiver cannot decode fragments independently.

use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Raw deflate window size in bits. Fixed by the wire format.
const DEFLATE_WINDOW_BITS: u8 = 10;

const B32_ALPHABET: base32::Alphabet = base32::Alphabet::Rfc4648 { padding: false };

// ── Encoding scheme ───────────────────────────────────────────────────────────

/// Text encoding scheme, identical for every fragment in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// Uppercase hexadecimal, two characters per byte.
    Hex,
    /// Base-32 (RFC 4648 alphabet), padding stripped.
    Base32,
    /// Raw deflate, then base-32.
    Base32Z,
}

impl Encoding {
    /// Single-character wire code.
    pub fn code(self) -> char {
        match self {
            Encoding::Hex => 'H',
            Encoding::Base32 => '2',
            Encoding::Base32Z => 'Z',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'H' => Some(Encoding::Hex),
            '2' => Some(Encoding::Base32),
            'Z' => Some(Encoding::Base32Z),
            _ => None,
        }
    }

    /// Characters per indivisible symbol group. A fragment boundary must be
    /// a multiple of this, so no symbol ever spans two fragments.
    pub fn alignment(self) -> usize {
        match self {
            Encoding::Hex => 2,
            Encoding::Base32 | Encoding::Base32Z => 8,
        }
    }
}

impl TryFrom<char> for Encoding {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        Encoding::from_code(c).ok_or(Error::UnknownEncoding(c))
    }
}

// ── Encode ────────────────────────────────────────────────────────────────────

/// Encode raw bytes into fragment text.
///
/// Returns the scheme actually used, the encoded text, and its alignment
/// granularity. With no request (or a `Base32Z` request) the payload is
/// trial-compressed: if deflate does not shrink it, the attempt is discarded
/// and the original bytes go out as plain base-32. An explicit `Hex` or
/// `Base32` request is honored as-is.
pub fn encode_payload(raw: &[u8], requested: Option<Encoding>) -> Result<(Encoding, String, usize)> {
    let (encoding, text) = match requested {
        Some(Encoding::Hex) => (Encoding::Hex, hex::encode_upper(raw)),
        Some(Encoding::Base32) => (Encoding::Base32, base32::encode(B32_ALPHABET, raw)),
        None | Some(Encoding::Base32Z) => match try_deflate(raw) {
            Some(z) if z.len() < raw.len() => {
                tracing::debug!(raw = raw.len(), deflated = z.len(), "compression kept");
                (Encoding::Base32Z, base32::encode(B32_ALPHABET, &z))
            }
            _ => {
                tracing::debug!(raw = raw.len(), "compression discarded, plain base-32");
                (Encoding::Base32, base32::encode(B32_ALPHABET, raw))
            }
        },
    };
    let alignment = encoding.alignment();
    Ok((encoding, text, alignment))
}

/// Decode fragment payload texts, already in index order.
///
/// Parts are decoded separately (not concatenated first) for the base-32
/// schemes: only the final part may have a length that is not a multiple of
/// the 8-character group, and decoding per part validates the encoder split
/// on group boundaries.
pub fn decode_payload<S: AsRef<str>>(parts: &[S], encoding: Encoding) -> Result<Vec<u8>> {
    if encoding == Encoding::Hex {
        let joined: String = parts.iter().map(|p| p.as_ref()).collect();
        return hex::decode(joined).map_err(|_| Error::MalformedEncoding);
    }

    let mut raw = Vec::new();
    for part in parts {
        let bytes = base32::decode(B32_ALPHABET, part.as_ref()).ok_or(Error::MalformedEncoding)?;
        raw.extend_from_slice(&bytes);
    }

    if encoding == Encoding::Base32Z {
        raw = inflate(&raw)?;
    }
    Ok(raw)
}

// ── Raw deflate streams ───────────────────────────────────────────────────────

/// Compress with a raw deflate stream. Returns None if the stream errors,
/// which the caller treats the same as compression not helping.
fn try_deflate(raw: &[u8]) -> Option<Vec<u8>> {
    let mut stream = Compress::new_with_window_bits(Compression::best(), false, DEFLATE_WINDOW_BITS);
    let mut out = Vec::with_capacity(raw.len() / 2 + 64);
    loop {
        let consumed = stream.total_in() as usize;
        let status = stream
            .compress_vec(&raw[consumed..], &mut out, FlushCompress::Finish)
            .ok()?;
        match status {
            Status::StreamEnd => return Some(out),
            Status::Ok | Status::BufError => {
                let grow = out.capacity().max(64);
                out.reserve(grow);
            }
        }
    }
}

fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut stream = Decompress::new_with_window_bits(false, DEFLATE_WINDOW_BITS);
    let mut out = Vec::with_capacity(data.len() * 4 + 64);
    loop {
        let consumed = stream.total_in() as usize;
        let produced = stream.total_out() as usize;
        let status = stream
            .decompress_vec(&data[consumed..], &mut out, FlushDecompress::Finish)
            .map_err(|_| Error::DecompressionFailed)?;
        match status {
            Status::StreamEnd => return Ok(out),
            Status::Ok | Status::BufError => {
                // A stalled stream with all input consumed is truncated data.
                if stream.total_in() as usize == consumed
                    && stream.total_out() as usize == produced
                {
                    return Err(Error::DecompressionFailed);
                }
                let grow = out.capacity().max(64);
                out.reserve(grow);
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
