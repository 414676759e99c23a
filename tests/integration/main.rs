//! qrpack integration test harness.
//!
//! End-to-end properties across the whole split/join pipeline: round trips
//! over the full grid of encodings, sizes and version bounds, transport
//! disorder tolerance, and the exact sizing scenarios the wire format pins
//! down.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use qrpack_core::{Encoding, FileType, SplitOptions};

mod joining;
mod loopback;

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Deterministic pseudo-random payload, so failures reproduce.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buf = vec![0u8; len];
    rng.fill_bytes(&mut buf);
    buf
}

/// Low-entropy payload that deflate shrinks dramatically.
pub fn repetitive_bytes(len: usize) -> Vec<u8> {
    vec![b'A'; len]
}

pub fn opts(encoding: Option<Encoding>, max_version: u8) -> SplitOptions {
    SplitOptions {
        encoding,
        max_version,
        ..SplitOptions::default()
    }
}

/// Every file type exercised by the grid tests.
pub const TYPES: [FileType; 4] = [
    FileType::Psbt,
    FileType::Binary,
    FileType::Json,
    FileType::UnicodeText,
];
