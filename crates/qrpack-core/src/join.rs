//! Joiner — validation and reassembly of a collected fragment set.
//!
//! Input order and duplication are whatever the transport produced; a
//! receiver re-supplies its whole accumulated set after every scan. Either
//! the set decodes consistently and completely, or the call fails with one
//! specific reason — there is no partial success.

use std::collections::BTreeMap;

use crate::codec::decode_payload;
use crate::error::{Error, Result};
use crate::header::{FileType, Header};

/// A reassembled payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Joined {
    pub file_type: FileType,
    pub raw: Vec<u8>,
}

/// Reassemble the original payload from an unordered, possibly duplicated
/// set of fragment texts.
pub fn join<S: AsRef<str>>(parts: &[S]) -> Result<Joined> {
    let mut series: Option<Header> = None;
    let mut chunks: BTreeMap<u16, &str> = BTreeMap::new();

    for part in parts {
        let (header, payload) = Header::parse(part.as_ref())?;

        match series {
            None => series = Some(header),
            Some(first) => {
                if (first.encoding, first.file_type, first.count)
                    != (header.encoding, header.file_type, header.count)
                {
                    return Err(Error::InconsistentSeries);
                }
            }
        }

        if header.index >= header.count {
            return Err(Error::IndexOutOfRange {
                index: header.index,
                count: header.count,
            });
        }

        // first sighting wins; a repeat must match byte for byte, so a
        // corrupted rescan can never overwrite good data
        match chunks.get(&header.index) {
            None => {
                chunks.insert(header.index, payload);
            }
            Some(seen) if *seen != payload => {
                return Err(Error::ConflictingDuplicate(header.index));
            }
            Some(_) => {}
        }
    }

    let Some(first) = series else {
        return Err(Error::NoFragments);
    };
    let file_type = first.file_type;

    let missing: Vec<u16> = (0..first.count).filter(|i| !chunks.contains_key(i)).collect();
    if !missing.is_empty() {
        return Err(Error::MissingFragments(missing));
    }

    // BTreeMap iterates in key order, which is index order
    let ordered: Vec<&str> = chunks.into_values().collect();
    let raw = decode_payload(&ordered, first.encoding)?;

    tracing::debug!(
        count = first.count,
        file_type = ?file_type,
        bytes = raw.len(),
        "series joined"
    );
    Ok(Joined { file_type, raw })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
