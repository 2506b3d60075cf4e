//! Seed hashing, packed bit sequences, and hardware entropy.

pub mod bits;
pub mod entropy;


// CONSTANTS
// ================================================================================================

const MIX_MULT_1: u64 = 0xbf58_476d_1ce4_e5b9;
const MIX_MULT_2: u64 = 0x94d0_49bb_1331_11eb;

// UTILITY FUNCTIONS
// ================================================================================================

/// Returns the SplitMix64 finalizer of `value`.
///
/// Used to spread a user-supplied seed into a generator state and, applied a second time, into an
/// independent stream increment. The function is a bijection on `u64`, so `hash(0) == 0` and no
/// other input maps to zero.
#[inline]
pub const fn hash(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(MIX_MULT_1);
    value ^= value >> 27;
    value = value.wrapping_mul(MIX_MULT_2);
    value ^= value >> 31;
    value
}
