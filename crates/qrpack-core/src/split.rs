//! Splitter — version selection and fragment production.
//!
//! The selection is a small bin-packing search: for every candidate version
//! the minimal fragment count is computed from the version's character
//! capacity (minus the header) aligned down to the encoding's symbol
//! granularity. Among everything the caller's bounds admit, fewest fragments
//! wins, then lowest version.

use crate::capacity::{capacity_chars, MAX_VERSION, MIN_VERSION};
use crate::codec::{encode_payload, Encoding};
use crate::error::{Error, Result};
use crate::header::{FileType, Header, HEADER_LEN, MAX_FRAGMENTS};

// ── Options ───────────────────────────────────────────────────────────────────

/// Caller bounds for the version/count search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
    /// Force a specific encoding. `None` lets trial compression decide.
    pub encoding: Option<Encoding>,
    /// Produce at least this many fragments.
    pub min_split: u16,
    /// Produce at most this many fragments.
    pub max_split: u16,
    /// Smallest version to consider.
    pub min_version: u8,
    /// Largest version to consider.
    pub max_version: u8,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            encoding: None,
            min_split: 1,
            max_split: MAX_FRAGMENTS,
            // versions below 5 are too small to be worth scanning for data
            min_version: 5,
            max_version: MAX_VERSION,
        }
    }
}

// ── Version selection ─────────────────────────────────────────────────────────

/// Outcome of the bin-packing search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub version: u8,
    pub count: u16,
    /// Characters of encoded text per fragment; the final fragment holds
    /// whatever remains (the runt) and may be shorter.
    pub per_fragment: usize,
}

/// Minimal fragment count for one version, or None if no split of this
/// version can carry the payload.
fn fragments_needed(version: u8, encoded_len: usize, alignment: usize) -> Result<Option<(usize, usize)>> {
    let cap = capacity_chars(version)? - HEADER_LEN;

    if encoded_len <= cap {
        // single fragment, no alignment concerns
        return Ok(Some((1, encoded_len)));
    }

    // two or more: every non-runt fragment is the capacity aligned down to
    // a symbol boundary
    let aligned = cap - cap % alignment;

    // explicit two-case runt formula, not a loop with boundary patching
    let count = if encoded_len % aligned == 0 {
        encoded_len / aligned
    } else {
        encoded_len / aligned + 1
    };

    let runt = encoded_len - (count - 1) * aligned;
    if runt > cap {
        return Ok(None);
    }
    Ok(Some((count, aligned)))
}

/// Pick the (version, fragment count) pair for `encoded_len` characters of
/// text with the given symbol alignment, under the caller's bounds.
/// Fewest fragments wins, then lowest version. `CannotFit` when nothing
/// satisfies the bounds.
pub fn select_version(encoded_len: usize, alignment: usize, opts: &SplitOptions) -> Result<Selection> {
    if opts.min_version < MIN_VERSION
        || opts.min_version > opts.max_version
        || opts.max_version > MAX_VERSION
    {
        return Err(Error::InvalidParameters("min/max version out of range"));
    }
    if opts.min_split < 1 || opts.min_split > opts.max_split || opts.max_split > MAX_FRAGMENTS {
        return Err(Error::InvalidParameters("min/max split out of range"));
    }

    let mut best: Option<Selection> = None;
    for version in opts.min_version..=opts.max_version {
        let Some((count, per_fragment)) = fragments_needed(version, encoded_len, alignment)? else {
            continue;
        };
        if count < opts.min_split as usize || count > opts.max_split as usize {
            continue;
        }
        let candidate = Selection {
            version,
            count: count as u16,
            per_fragment,
        };
        let better = match best {
            None => true,
            Some(b) => (candidate.count, candidate.version) < (b.count, b.version),
        };
        if better {
            best = Some(candidate);
        }
    }
    best.ok_or(Error::CannotFit)
}

// ── Split ─────────────────────────────────────────────────────────────────────

/// One split call's output: the chosen version and the fragments in index
/// order. The version matters to renderers — it fixes the code geometry
/// independent of fragment content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitResult {
    pub version: u8,
    pub parts: Vec<String>,
}

/// Encode `raw` and slice it into a series of header-tagged fragments.
///
/// Either the full series is returned or the call fails before producing
/// any fragment.
pub fn split(raw: &[u8], file_type: FileType, opts: &SplitOptions) -> Result<SplitResult> {
    let (encoding, encoded, alignment) = encode_payload(raw, opts.encoding)?;
    let sel = select_version(encoded.len(), alignment, opts)?;
    tracing::debug!(
        version = sel.version,
        count = sel.count,
        encoding = ?encoding,
        encoded_len = encoded.len(),
        "version selected"
    );

    let mut parts = Vec::with_capacity(sel.count as usize);
    for index in 0..sel.count {
        let header = Header {
            encoding,
            file_type,
            count: sel.count,
            index,
        };
        let off = index as usize * sel.per_fragment;
        let end = (off + sel.per_fragment).min(encoded.len());
        let mut part = String::with_capacity(HEADER_LEN + (end - off));
        part.push_str(&header.render());
        part.push_str(&encoded[off..end]);
        parts.push(part);
    }

    Ok(SplitResult {
        version: sel.version,
        parts,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
