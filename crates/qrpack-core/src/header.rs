//! Fragment framing — the fixed 8-character text header.
//!
//! Wire layout, ASCII only:
//!
//! ```text
//! B$                  fixed magic (2 chars)
//! Z                   encoding: H=hex, 2=base-32, Z=deflate+base-32
//! P                   file type code
//! 05                  total fragment count, 2 digits of base-36
//! 00                  this fragment's index, 2 digits of base-36
//! ```
//!
//! Count and index are fixed-width base-36 (`00` through `ZZ`), so a series
//! can hold at most 1295 fragments. The radix is a protocol constant; the
//! earlier base-16 revision is not wire-compatible and is not supported.

use serde::{Deserialize, Serialize};

use crate::codec::Encoding;
use crate::error::{Error, Result};

/// Fixed protocol prefix on every fragment.
pub const MAGIC: &str = "B$";

/// Total header length in characters.
pub const HEADER_LEN: usize = 8;

/// Largest fragment count two base-36 digits can carry.
pub const MAX_FRAGMENTS: u16 = 1295;

// ── File types ────────────────────────────────────────────────────────────────

/// Payload type code, carried unchanged through split and join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    Psbt,
    Txn,
    Json,
    Cbor,
    UnicodeText,
    Executable,
    Binary,
    KtRx,
    KtTx,
    KtPsbt,
}

impl FileType {
    pub const ALL: [FileType; 10] = [
        FileType::Psbt,
        FileType::Txn,
        FileType::Json,
        FileType::Cbor,
        FileType::UnicodeText,
        FileType::Executable,
        FileType::Binary,
        FileType::KtRx,
        FileType::KtTx,
        FileType::KtPsbt,
    ];

    /// Single-character wire code.
    pub fn code(self) -> char {
        match self {
            FileType::Psbt => 'P',
            FileType::Txn => 'T',
            FileType::Json => 'J',
            FileType::Cbor => 'C',
            FileType::UnicodeText => 'U',
            FileType::Executable => 'X',
            FileType::Binary => 'B',
            FileType::KtRx => 'R',
            FileType::KtTx => 'S',
            FileType::KtPsbt => 'E',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == c)
    }

    /// Human-readable name, for front ends.
    pub fn name(self) -> &'static str {
        match self {
            FileType::Psbt => "PSBT",
            FileType::Txn => "Transaction",
            FileType::Json => "JSON",
            FileType::Cbor => "CBOR",
            FileType::UnicodeText => "Unicode Text",
            FileType::Executable => "Executable",
            FileType::Binary => "Binary",
            FileType::KtRx => "KT Rx",
            FileType::KtTx => "KT Tx",
            FileType::KtPsbt => "KT PSBT",
        }
    }
}

impl TryFrom<char> for FileType {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        FileType::from_code(c).ok_or(Error::UnknownFileType(c))
    }
}

// ── Header ────────────────────────────────────────────────────────────────────

/// Parsed (or to-be-rendered) fragment header.
///
/// All fragments in one series share `encoding`, `file_type`, and `count`;
/// only `index` differs. That shared triple is how a receiver tells series
/// apart without any side channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub encoding: Encoding,
    pub file_type: FileType,
    pub count: u16,
    pub index: u16,
}

impl Header {
    /// Render the fixed 8-character header string.
    pub fn render(&self) -> String {
        debug_assert!(self.count >= 1 && self.count <= MAX_FRAGMENTS);
        debug_assert!(self.index < self.count);

        let mut s = String::with_capacity(HEADER_LEN);
        s.push_str(MAGIC);
        s.push(self.encoding.code());
        s.push(self.file_type.code());
        s.extend(base36_pair(self.count));
        s.extend(base36_pair(self.index));
        s
    }

    /// Parse a fragment's header, returning it and the payload text that
    /// follows. Index-vs-count validation is the joiner's job; this only
    /// checks the header's own fields.
    pub fn parse(text: &str) -> Result<(Header, &str)> {
        let b = text.as_bytes();
        if b.len() < HEADER_LEN {
            return Err(Error::TruncatedHeader(b.len()));
        }
        if &b[..2] != MAGIC.as_bytes() {
            return Err(Error::BadMagic);
        }
        let encoding = Encoding::from_code(b[2] as char).ok_or(Error::BadEncoding(b[2] as char))?;
        let file_type = FileType::from_code(b[3] as char).ok_or(Error::BadFileType(b[3] as char))?;
        let count = base36_field(b[4], b[5])?;
        let index = base36_field(b[6], b[7])?;

        // first 8 bytes are validated ASCII, so this slice is on a char boundary
        let header = Header { encoding, file_type, count, index };
        Ok((header, &text[HEADER_LEN..]))
    }
}

// ── Base-36 fields ────────────────────────────────────────────────────────────

fn base36_pair(n: u16) -> [char; 2] {
    debug_assert!(n <= MAX_FRAGMENTS);
    [base36_char(n / 36), base36_char(n % 36)]
}

fn base36_char(d: u16) -> char {
    if d < 10 {
        (b'0' + d as u8) as char
    } else {
        (b'A' + (d - 10) as u8) as char
    }
}

fn base36_field(hi: u8, lo: u8) -> Result<u16> {
    let hi = base36_digit(hi).ok_or(Error::MalformedIndex)?;
    let lo = base36_digit(lo).ok_or(Error::MalformedIndex)?;
    Ok(hi * 36 + lo)
}

fn base36_digit(b: u8) -> Option<u16> {
    match b {
        b'0'..=b'9' => Some((b - b'0') as u16),
        b'A'..=b'Z' => Some((b - b'A') as u16 + 10),
        b'a'..=b'z' => Some((b - b'a') as u16 + 10),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
