//! Packed bit sequences.
//!
//! A bit sequence is stored low-bit-first in consecutive `u64` words: bit `i` lives in word
//! `i / 64` at position `i % 64`. Nothing here knows the logical length of a sequence; callers
//! pass bit counts alongside the slice and indexing past the slice panics.

use crate::WORD_BITS;

/// Single-bit access to a packed bit sequence.
pub trait BitArray {
    /// Sets bit `index` to 1.
    fn set_bit(&mut self, index: u64);

    /// Returns true if bit `index` is 1.
    fn test_bit(&self, index: u64) -> bool;

    /// Returns the window of bits starting at `index`, masked by `mask`.
    ///
    /// Bit `index` lands in bit 0 of the result. The window may straddle a word boundary.
    fn mask_at(&self, index: u64, mask: u64) -> u64;

    /// Clears every word that holds any of the first `len` bits.
    fn clear_prefix(&mut self, len: u64);
}

impl BitArray for [u64] {
    #[inline]
    fn set_bit(&mut self, index: u64) {
        self[word_index(index)] |= 1_u64 << bit_offset(index);
    }

    #[inline]
    fn test_bit(&self, index: u64) -> bool {
        (self[word_index(index)] >> bit_offset(index)) & 1 == 1
    }

    #[inline]
    fn mask_at(&self, index: u64, mask: u64) -> u64 {
        debug_assert!(mask != 0, "empty mask");

        let word = word_index(index);
        let offset = bit_offset(index);
        let mut window = self[word] >> offset;

        // pull in the low bits of the next word only if the mask reaches past this one
        let width = WORD_BITS - u64::from(mask.leading_zeros());
        if offset != 0 && offset + width > WORD_BITS {
            window |= self[word + 1] << (WORD_BITS - offset);
        }

        window & mask
    }

    #[inline]
    fn clear_prefix(&mut self, len: u64) {
        self[..words_for(len)].fill(0);
    }
}

/// Returns the number of words needed to hold `bits` bits.
pub const fn words_for(bits: u64) -> usize {
    bits.div_ceil(WORD_BITS) as usize
}

// HELPER FUNCTIONS
// ================================================================================================

#[inline(always)]
fn word_index(index: u64) -> usize {
    (index / WORD_BITS) as usize
}

#[inline(always)]
fn bit_offset(index: u64) -> u64 {
    index % WORD_BITS
}
