//! Capacity model — characters per QR version.
//!
//! The protocol fixes error correction at level L and the text alphabet at
//! QR alphanumeric mode. Both are wire-format choices, not per-call options:
//! every entry below is the ISO/IEC 18004 alphanumeric capacity at ECC L.
//! All downstream sizing math depends on these values being exact.

use crate::error::{Error, Result};

/// Smallest supported QR version.
pub const MIN_VERSION: u8 = 1;

/// Largest supported QR version.
pub const MAX_VERSION: u8 = 40;

/// Alphanumeric character capacity at ECC level L, indexed by version − 1.
const ALNUM_CAPACITY_L: [u16; 40] = [
    25, 47, 77, 114, 154, 195, 224, 279, 335, 395, // 1..=10
    468, 535, 619, 667, 758, 854, 938, 1046, 1153, 1249, // 11..=20
    1352, 1460, 1588, 1704, 1853, 1990, 2132, 2223, 2369, 2520, // 21..=30
    2677, 2840, 3009, 3183, 3351, 3537, 3729, 3927, 4087, 4296, // 31..=40
];

/// Maximum number of text characters a single code of `version` can hold,
/// header included.
pub fn capacity_chars(version: u8) -> Result<usize> {
    if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
        return Err(Error::InvalidVersion(version));
    }
    Ok(ALNUM_CAPACITY_L[version as usize - 1] as usize)
}

/// Side length in modules (pixels) of a code of `version`.
pub fn version_size(version: u8) -> Result<usize> {
    if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
        return Err(Error::InvalidVersion(version));
    }
    Ok(17 + 4 * version as usize)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
