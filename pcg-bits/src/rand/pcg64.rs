use core::num::NonZeroU64;

use log::debug;
use rand_core::{RngCore, impls};

use crate::utils::{
    entropy::{EntropyError, EntropySource, HardwareEntropy},
    hash,
};

// CONSTANTS
// ================================================================================================

/// LCG multiplier of the 64-bit state transition.
const MULTIPLIER: u64 = 0x5851_f42d_4c95_7f2d;

/// Odd multiplier of the RXS-M-XS output permutation.
const OUTPUT_MULTIPLIER: u64 = 0xaef1_7502_108e_f2d9;

// PCG64
// ================================================================================================

/// A single 64-bit PCG stream with the insecure 64-bit RXS-M-XS output (`pcg64i` in the PCG
/// family).
///
/// The `increment` selects the stream and is always odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pcg64 {
    state: u64,
    increment: u64,
}

impl Pcg64 {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns a new generator for `seed`.
    ///
    /// A non-zero seed gives a deterministic generator (see [Self::seeded]). A zero seed draws the
    /// state and the increment from the hardware entropy instruction.
    ///
    /// # Errors
    /// Returns an error if `seed` is zero and hardware entropy is unsupported or exhausted.
    pub fn init(seed: u64) -> Result<Self, EntropyError> {
        match NonZeroU64::new(seed) {
            Some(seed) => Ok(Self::seeded(seed)),
            None => Self::from_entropy(&mut HardwareEntropy::new()?),
        }
    }

    /// Returns a deterministic generator for `seed`.
    ///
    /// The state is `hash(seed)` and the increment is `hash(hash(seed))` with its low bit forced
    /// on, so two generators built from the same seed produce identical sequences.
    pub const fn seeded(seed: NonZeroU64) -> Self {
        let state = hash(seed.get());
        Self { state, increment: hash(state) | 1 }
    }

    /// Returns a generator whose state and increment are read from `source`, in that order.
    ///
    /// # Errors
    /// Returns an error if either word could not be read.
    pub fn from_entropy<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, EntropyError> {
        let state = source.next_word()?;
        let increment = source.next_word()? | 1;
        debug!("seeded pcg64 stream from entropy");

        Ok(Self { state, increment })
    }

    /// Returns a [Pcg64] instantiated from the provided components.
    ///
    /// # Panics
    /// Panics if `increment` is even.
    pub fn from_parts(state: u64, increment: u64) -> Self {
        assert!(increment & 1 == 1, "stream increment must be odd");
        Self { state, increment }
    }

    /// Returns the state and the increment of this generator.
    pub fn into_parts(self) -> (u64, u64) {
        (self.state, self.increment)
    }

    // GENERATION
    // --------------------------------------------------------------------------------------------

    /// Advances the stream and returns the permuted pre-update state.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        let x = self.state;
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(self.increment);

        let fx = ((x >> ((x >> 59) + 5)) ^ x).wrapping_mul(OUTPUT_MULTIPLIER);
        (fx >> 43) ^ fx
    }
}

// RNGCORE IMPLEMENTATION
// ------------------------------------------------------------------------------------------------

impl RngCore for Pcg64 {
    fn next_u32(&mut self) -> u32 {
        self.next() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}
