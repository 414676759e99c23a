//! qrpack-core — split binary payloads into self-describing text fragments
//! sized for capacity-limited optical codes, and join them back.
//!
//! The library is pure: no process-wide state, no I/O, no interior
//! mutability. Rendering fragments as images and sniffing file types are
//! the caller's concern — `split` and `join` are the only entry points a
//! front end needs.

pub mod capacity;
pub mod codec;
pub mod error;
pub mod header;
pub mod join;
pub mod split;

pub use capacity::{capacity_chars, MAX_VERSION, MIN_VERSION};
pub use codec::{decode_payload, encode_payload, Encoding};
pub use error::Error;
pub use header::{FileType, Header, HEADER_LEN, MAX_FRAGMENTS};
pub use join::{join, Joined};
pub use split::{select_version, split, Selection, SplitOptions, SplitResult};
