use core::num::NonZeroU64;

use log::debug;
use rand_core::RngCore;

use super::Pcg32;
use crate::{
    LANES,
    utils::{
        entropy::{EntropyError, EntropySource, HardwareEntropy},
        hash,
    },
};

mod arch;
pub use arch::Kernel;

// CONSTANTS
// ================================================================================================

/// Mask selecting the live low half of a lane.
const LOW_HALF: u64 = 0xffff_ffff;

/// Number of bytes in one output block.
const BLOCK_BYTES: usize = LANES * 8;

// PCG32X4
// ================================================================================================

/// Four independent 32-bit PCG streams advanced together in one 256-bit vector.
///
/// Lane `i` holds stream `i` in the low 32 bits of its state and increment; the high halves are
/// always zero. Each call to [Self::next] advances every stream twice and packs the two outputs of
/// stream `i` into output lane `i`, the first draw in the low 32 bits and the second in the high
/// 32 bits. Lane `i` therefore reproduces, call for call, the [Pcg32] returned by
/// [Self::lane]`(i)`.
///
/// Lane 0 is the least significant 64 bits of the AVX2 register. The [Kernel] is detected once
/// when the generator is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pcg32x4 {
    state: [u64; LANES],
    increment: [u64; LANES],
    kernel: Kernel,
}

impl Pcg32x4 {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns a new generator for the four `seeds`, lane `i` taking `seeds[i]`.
    ///
    /// If every seed is non-zero the generator is deterministic (see [Self::seeded]). If any seed
    /// is zero, all four streams are drawn from the hardware entropy instruction.
    ///
    /// # Errors
    /// Returns an error if hardware entropy is needed and is unsupported or exhausted. Seeding is
    /// all-or-nothing: no generator is returned when any lane could not be seeded.
    pub fn init(seeds: [u64; LANES]) -> Result<Self, EntropyError> {
        if let [Some(a), Some(b), Some(c), Some(d)] = seeds.map(NonZeroU64::new) {
            Ok(Self::seeded([a, b, c, d]))
        } else {
            Self::from_entropy(&mut HardwareEntropy::new()?)
        }
    }

    /// Returns a deterministic generator where lane `i` has state `hash(seeds[i])` and increment
    /// `hash(hash(seeds[i]))`, both truncated to 32 bits, the increment forced odd.
    pub fn seeded(seeds: [NonZeroU64; LANES]) -> Self {
        let state = seeds.map(|seed| hash(seed.get()));
        let increment = state.map(hash);
        Self::masked(state, increment)
    }

    /// Returns a generator seeded from `source`.
    ///
    /// Four state words are read in one batch, then four increment words in a second batch.
    ///
    /// # Errors
    /// Returns an error if any of the eight words could not be read.
    pub fn from_entropy<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, EntropyError> {
        let mut state = [0; LANES];
        source.fill_words(&mut state)?;

        let mut increment = [0; LANES];
        source.fill_words(&mut increment)?;
        debug!("seeded pcg32x4 streams from entropy");

        Ok(Self::masked(state, increment))
    }

    /// Returns a [Pcg32x4] instantiated from the provided components.
    ///
    /// # Panics
    /// Panics if any lane has a non-zero high half or an even increment.
    pub fn from_parts(state: [u64; LANES], increment: [u64; LANES]) -> Self {
        assert!(
            state.iter().chain(increment.iter()).all(|lane| lane & !LOW_HALF == 0),
            "high half of every lane must be zero"
        );
        assert!(increment.iter().all(|lane| lane & 1 == 1), "stream increments must be odd");
        Self { state, increment, kernel: Kernel::detect() }
    }

    /// Returns the state and the increment lanes of this generator.
    pub fn into_parts(self) -> ([u64; LANES], [u64; LANES]) {
        (self.state, self.increment)
    }

    /// Returns the kernel advancing the streams of this generator.
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// Returns stream `index` as a standalone [Pcg32] in its current position.
    ///
    /// # Panics
    /// Panics if `index` is not less than [LANES].
    pub fn lane(&self, index: usize) -> Pcg32 {
        Pcg32::from_parts(self.state[index] as u32, self.increment[index] as u32)
    }

    // GENERATION
    // --------------------------------------------------------------------------------------------

    /// Advances every stream twice and returns 256 bits as four 64-bit lanes.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> [u64; LANES] {
        self.kernel.next_block(&mut self.state, &self.increment)
    }

    // HELPERS
    // --------------------------------------------------------------------------------------------

    fn masked(state: [u64; LANES], increment: [u64; LANES]) -> Self {
        Self {
            state: state.map(|lane| lane & LOW_HALF),
            increment: increment.map(|lane| (lane & LOW_HALF) | 1),
            kernel: Kernel::detect(),
        }
    }
}

// RNGCORE IMPLEMENTATION
// ------------------------------------------------------------------------------------------------

/// Every call draws a whole block. [RngCore::next_u64] keeps lane 0 and discards the rest; use
/// [Pcg32x4::next] or [RngCore::fill_bytes] to consume all 256 bits.
impl RngCore for Pcg32x4 {
    fn next_u32(&mut self) -> u32 {
        self.next()[0] as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()[0]
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(BLOCK_BYTES);
        for chunk in &mut chunks {
            write_block(chunk, &self.next());
        }

        let tail = chunks.into_remainder();
        if !tail.is_empty() {
            let mut bytes = [0u8; BLOCK_BYTES];
            write_block(&mut bytes, &self.next());
            tail.copy_from_slice(&bytes[..tail.len()]);
        }
    }
}

#[inline]
fn write_block(dest: &mut [u8], block: &[u64; LANES]) {
    for (bytes, lane) in dest.chunks_exact_mut(8).zip(block) {
        bytes.copy_from_slice(&lane.to_le_bytes());
    }
}
