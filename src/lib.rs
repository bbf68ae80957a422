//! # patricia-dict
//!
//! An exact-match dictionary over byte-string keys built on a Patricia trie,
//! with counters that report how much work each lookup performed.
//!
//! The trie branches on single bits. Each node records the first bit index
//! at which the keys below it disagree, so a lookup probes only the bits that
//! matter and finishes with a single whole-key comparison.
//!
//! ## Example
//!
//! ```rust
//! use patricia_dict::{Counters, PatriciaTrie};
//!
//! let mut trie: PatriciaTrie<u32> = PatriciaTrie::new();
//! trie.insert(b"Carlton", 1).unwrap();
//! trie.insert(b"Carlton North", 2).unwrap();
//! trie.insert(b"Parkville", 3).unwrap();
//!
//! let mut counters = Counters::new();
//! assert_eq!(trie.search(b"Carlton", &mut counters).unwrap(), Some(&1));
//! assert_eq!(trie.search(b"Brunswick", &mut counters).unwrap(), None);
//! assert_eq!(counters.string_comparisons, 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod bits;
pub mod counters;
pub mod error;
pub mod trie;

pub use counters::{Counters, Tracker};
pub use error::{KeyError, Result};
pub use trie::{Iter, PatriciaTrie};

#[cfg(test)]
mod proptests;
