//! Bit-level key access.
//!
//! Bits are numbered from the most significant bit of the first byte, MSB
//! first within each byte and continuing across consecutive bytes: bit 0 of
//! `b"A"` (`0x41 = 0b0100_0001`) is 0, bit 1 is 1 and bit 7 is 1.

use crate::counters::Tracker;
use crate::error::{KeyError, Result};

/// Number of bits in a key byte.
pub const BITS_PER_BYTE: usize = 8;

#[inline]
fn bit_byte_index(bit: usize) -> usize {
    bit / BITS_PER_BYTE
}

/// Bit index within its byte, where `0` is the MSB and `7` is the LSB.
#[inline]
fn bit_in_byte_msb0(bit: usize) -> u32 {
    (bit % BITS_PER_BYTE) as u32
}

#[inline]
fn extract(byte: u8, bit: usize) -> u8 {
    (byte >> (7 - bit_in_byte_msb0(bit))) & 1
}

/// Returns the bit at `bit` in `key`.
///
/// Fails with [`KeyError::BitOutOfRange`] when `bit` addresses a byte past
/// the end of the key.
pub fn get_bit(key: &[u8], bit: usize) -> Result<u8> {
    match key.get(bit_byte_index(bit)) {
        Some(&byte) => Ok(extract(byte, bit)),
        None => Err(KeyError::BitOutOfRange {
            bit,
            len_bits: key.len() * BITS_PER_BYTE,
        }),
    }
}

/// Returns the bit at `bit` in `key` viewed as a NUL-terminated string padded
/// with zero bytes forever.
///
/// Descents probe the query at the branching bit of whatever node they reach,
/// which may lie beyond the query's own bytes. Those positions read as 0, the
/// same value the stored terminator has.
#[inline]
pub fn padded_bit(key: &[u8], bit: usize) -> u8 {
    key.get(bit_byte_index(bit))
        .map_or(0, |&byte| extract(byte, bit))
}

/// First bit index at which `key_a` and `key_b` differ.
///
/// An absent `key_a` differs at bit 0. When the keys agree over the whole
/// extent of the shorter one, the result is that extent in bits; for
/// NUL-terminated keys this only happens when they are equal.
pub fn compute_diff(key_a: Option<&[u8]>, key_b: &[u8]) -> usize {
    compute_diff_tracked(key_a, key_b, &mut ())
}

/// [`compute_diff`], reporting two extracted bits per position scanned.
pub fn compute_diff_tracked<T: Tracker>(
    key_a: Option<&[u8]>,
    key_b: &[u8],
    tracker: &mut T,
) -> usize {
    let Some(key_a) = key_a else {
        return 0;
    };

    let min_len = key_a.len().min(key_b.len());
    for (i, (&a, &b)) in key_a.iter().zip(key_b).enumerate() {
        let x = a ^ b;
        if x == 0 {
            tracker.bits(2 * BITS_PER_BYTE as u64);
            continue;
        }
        let in_byte = x.leading_zeros() as usize;
        tracker.bits(2 * (in_byte as u64 + 1));
        return i * BITS_PER_BYTE + in_byte;
    }

    min_len * BITS_PER_BYTE
}
