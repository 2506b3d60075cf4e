use core::num::NonZeroU64;

use rand_core::{RngCore, impls};

use crate::utils::{
    entropy::{EntropyError, EntropySource},
    hash,
};

// CONSTANTS
// ================================================================================================

/// LCG multiplier of the 32-bit state transition.
pub(crate) const MULTIPLIER: u32 = 0x2c92_77b5;

/// Odd multiplier of the 32-bit RXS-M-XS output permutation.
pub(crate) const OUTPUT_MULTIPLIER: u32 = 0x108e_f2d9;

// PCG32
// ================================================================================================

/// A single 32-bit PCG stream with the insecure 32-bit RXS-M-XS output (`pcg32i`).
///
/// Each lane of a [Pcg32x4](super::Pcg32x4) is exactly one of these streams, and
/// [Pcg32x4::lane](super::Pcg32x4::lane) returns it. Seeding follows the same derivation as the
/// vector generator, truncated to 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pcg32 {
    state: u32,
    increment: u32,
}

impl Pcg32 {
    /// Returns a deterministic generator for `seed`.
    pub const fn seeded(seed: NonZeroU64) -> Self {
        let state = hash(seed.get());
        Self {
            state: state as u32,
            increment: (hash(state) | 1) as u32,
        }
    }

    /// Returns a generator whose state and increment are the low halves of two words read from
    /// `source`.
    ///
    /// # Errors
    /// Returns an error if either word could not be read.
    pub fn from_entropy<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, EntropyError> {
        let state = source.next_word()? as u32;
        let increment = (source.next_word()? | 1) as u32;
        Ok(Self { state, increment })
    }

    /// Returns a [Pcg32] instantiated from the provided components.
    ///
    /// # Panics
    /// Panics if `increment` is even.
    pub fn from_parts(state: u32, increment: u32) -> Self {
        assert!(increment & 1 == 1, "stream increment must be odd");
        Self { state, increment }
    }

    /// Returns the state and the increment of this generator.
    pub fn into_parts(self) -> (u32, u32) {
        (self.state, self.increment)
    }

    /// Advances the stream and returns the permuted pre-update state.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u32 {
        let x = self.state;
        self.state = advance(x, self.increment);
        permute(x)
    }
}

impl RngCore for Pcg32 {
    fn next_u32(&mut self) -> u32 {
        self.next()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// One LCG transition of a 32-bit stream.
#[inline(always)]
pub(crate) const fn advance(state: u32, increment: u32) -> u32 {
    state.wrapping_mul(MULTIPLIER).wrapping_add(increment)
}

/// The 32-bit RXS-M-XS output permutation.
#[inline(always)]
pub(crate) const fn permute(x: u32) -> u32 {
    let fx = ((x >> ((x >> 28) + 4)) ^ x).wrapping_mul(OUTPUT_MULTIPLIER);
    (fx >> 22) ^ fx
}
