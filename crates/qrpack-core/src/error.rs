//! Error taxonomy for split and join.
//!
//! Every failure is a distinct variant so callers can match on the exact
//! reason. Nothing here is retried internally — a caller waiting on more
//! scans simply calls `join` again with the larger set.

/// Errors from splitting, joining, or interpreting fragment text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// QR version outside the supported 1..=40 range.
    #[error("version {0} outside supported range 1..=40")]
    InvalidVersion(u8),

    /// Caller-supplied split/version bounds are inconsistent.
    #[error("invalid parameters: {0}")]
    InvalidParameters(&'static str),

    /// File type code not in the known set.
    #[error("unknown file type code: {0:?}")]
    UnknownFileType(char),

    /// Encoding code not one of H, 2, Z.
    #[error("unknown encoding code: {0:?}")]
    UnknownEncoding(char),

    /// No (version, fragment count) combination satisfies the bounds.
    #[error("payload cannot fit within the given version and split bounds")]
    CannotFit,

    /// Fragment text shorter than the fixed 8-character header.
    #[error("fragment too short to hold a header: {0} chars")]
    TruncatedHeader(usize),

    /// Fixed "B$" prefix missing — foreign or corrupted input.
    #[error("fixed magic \"B$\" not found")]
    BadMagic,

    /// Header encoding character outside the closed set.
    #[error("bad encoding char in header: {0:?}")]
    BadEncoding(char),

    /// Header file type character outside the closed set.
    #[error("bad file type char in header: {0:?}")]
    BadFileType(char),

    /// Count or index field is not two base-36 digits.
    #[error("count/index field is not valid base-36")]
    MalformedIndex,

    /// Fragments from different series (or with corrupted headers) were
    /// supplied together and must not be merged.
    #[error("conflicting encoding/file type/count across fragments")]
    InconsistentSeries,

    /// A fragment's index is not below the series count.
    #[error("fragment index {index} out of range, series has {count}")]
    IndexOutOfRange { index: u16, count: u16 },

    /// Two fragments claim the same index with different payload text.
    #[error("duplicate of fragment {0} has different content")]
    ConflictingDuplicate(u16),

    /// Series is incomplete; carries the sorted missing indices.
    #[error("fragments missing: {0:?}")]
    MissingFragments(Vec<u16>),

    /// Join was called with an empty fragment set.
    #[error("no fragments supplied")]
    NoFragments,

    /// Payload text is not valid for its declared encoding.
    #[error("payload text invalid for its declared encoding")]
    MalformedEncoding,

    /// Compressed payload is corrupt or truncated.
    #[error("compressed payload failed to decompress")]
    DecompressionFailed,
}

pub type Result<T> = std::result::Result<T, Error>;
