//! Comparison counters for measuring lookup cost.
//!
//! Tracked operations take a `&mut impl Tracker`. Pass a [`Counters`] to
//! accumulate costs, or `&mut ()` to measure nothing. Counters are outputs
//! only: they never influence what an operation does or returns.

use std::fmt;

/// Receives one event per unit of work performed by a trie operation.
pub trait Tracker {
    /// A single bit was extracted from a key.
    fn bit(&mut self);

    /// `n` bits were extracted from keys.
    fn bits(&mut self, n: u64) {
        for _ in 0..n {
            self.bit();
        }
    }

    /// A structural node was visited during a descent.
    fn node(&mut self);

    /// Two whole keys were compared.
    fn key_cmp(&mut self);
}

impl Tracker for () {
    #[inline]
    fn bit(&mut self) {}

    #[inline]
    fn bits(&mut self, _n: u64) {}

    #[inline]
    fn node(&mut self) {}

    #[inline]
    fn key_cmp(&mut self) {}
}

/// Running totals of the work done by tracked operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    /// Bits extracted from keys.
    pub bit_comparisons: u64,
    /// Structural nodes visited.
    pub node_accesses: u64,
    /// Whole-key comparisons.
    pub string_comparisons: u64,
}

impl Counters {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The work done since `earlier` was snapshotted from these counters.
    ///
    /// A counter that is smaller than its value in `earlier` (for example
    /// after a [`reset`](Self::reset)) reports zero.
    pub fn since(&self, earlier: &Counters) -> Counters {
        Counters {
            bit_comparisons: self.bit_comparisons.saturating_sub(earlier.bit_comparisons),
            node_accesses: self.node_accesses.saturating_sub(earlier.node_accesses),
            string_comparisons: self
                .string_comparisons
                .saturating_sub(earlier.string_comparisons),
        }
    }
}

impl Tracker for Counters {
    #[inline]
    fn bit(&mut self) {
        self.bit_comparisons += 1;
    }

    #[inline]
    fn bits(&mut self, n: u64) {
        self.bit_comparisons += n;
    }

    #[inline]
    fn node(&mut self) {
        self.node_accesses += 1;
    }

    #[inline]
    fn key_cmp(&mut self) {
        self.string_comparisons += 1;
    }
}

impl fmt::Display for Counters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "b{} n{} s{}",
            self.bit_comparisons, self.node_accesses, self.string_comparisons
        )
    }
}
