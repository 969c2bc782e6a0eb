//! Library error type. Sparse by design: most conditions in this crate are
//! sentinel values (`-1` distances, empty suggestion lists), not errors — see
//! the error handling design note in the specification. Only genuine caller
//! mistakes raise.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(
        "requested max_edit_distance {requested} exceeds the index's configured maximum {configured}"
    )]
    MaxEditDistanceExceeded { requested: i64, configured: i64 },

    #[error(
        "prefix_length {prefix_length} must be >= max_edit_distance {max_edit_distance}"
    )]
    InvalidPrefixLength { prefix_length: i64, max_edit_distance: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
