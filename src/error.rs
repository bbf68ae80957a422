//! Error types for key validation.
//!
//! The trie never fails for structural reasons; the only errors it reports
//! are caller contract violations on the keys it is handed.

use thiserror::Error;

/// Result type alias for trie operations.
pub type Result<T> = std::result::Result<T, KeyError>;

/// A key that the trie refuses to index or probe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Keys must contain at least one byte.
    #[error("key is empty")]
    Empty,

    /// Keys are stored NUL-terminated, so `0x00` cannot appear inside one.
    #[error("key contains a NUL byte at offset {offset}")]
    InteriorNul {
        /// Byte offset of the first NUL.
        offset: usize,
    },

    /// A bit index addressed past the end of the key.
    #[error("bit index {bit} is out of range for a key of {len_bits} bits")]
    BitOutOfRange {
        /// Requested bit index.
        bit: usize,
        /// Number of addressable bits in the key.
        len_bits: usize,
    },
}

/// Checks that `key` can be stored in a trie.
pub fn validate_key(key: &[u8]) -> Result<()> {
    if key.is_empty() {
        return Err(KeyError::Empty);
    }
    match key.iter().position(|&b| b == 0) {
        Some(offset) => Err(KeyError::InteriorNul { offset }),
        None => Ok(()),
    }
}
