//! Error types for the suburb dictionary.

use patricia_dict::KeyError;
use thiserror::Error;

/// Result type alias for dictionary operations.
pub type Result<T> = std::result::Result<T, DictError>;

/// Errors raised while loading, exporting or querying the dictionary.
#[derive(Error, Debug)]
pub enum DictError {
    /// Reading input or writing a report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A data row could not be read or did not match the record layout.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record's key could not be indexed.
    #[error("cannot index key {key:?} (row {row}): {source}")]
    Key {
        /// The offending key.
        key: String,
        /// 1-based data row number, not counting the header.
        row: usize,
        /// Why the trie rejected it.
        source: KeyError,
    },

    /// Searching for a loaded key did not find it.
    #[error("verification failed: {found} of {keys} stored keys found")]
    Verify {
        /// Keys found again by searching.
        found: usize,
        /// Distinct keys in the index.
        keys: usize,
    },
}
