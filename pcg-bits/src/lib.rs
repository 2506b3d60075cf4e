#![no_std]

//! Permuted congruential generators and bit-level samplers for non-cryptographic numeric work.
//!
//! The crate provides:
//! - [Pcg64], a 64-bit state PCG with the RXS-M-XS output permutation;
//! - [Pcg32x4], four independent 32-bit PCG streams advanced together in one 256-bit vector
//!   (AVX2 when the CPU supports it, a portable lane loop otherwise);
//! - samplers built on any [rand_core::RngCore]: batched Bernoulli words ([sampling::bias]),
//!   binomial counts, and unbiased integers in a range;
//! - transforms over packed bit sequences: Von Neumann debiasing and cyclic autocorrelation.
//!
//! None of this is suitable for cryptographic use.

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod bitstream;
pub mod rand;
pub mod sampling;
pub mod utils;

// RE-EXPORTS
// ================================================================================================

pub use bitstream::{StreamTransfer, autocorrelation, debias};
pub use rand::{Kernel, Pcg32, Pcg32x4, Pcg64};
pub use sampling::{BitRng, bias, binomial, uniform_in_range};
pub use utils::{
    bits::BitArray,
    entropy::{EntropyError, EntropySource, HardwareEntropy, hardware_random},
    hash,
};

// CONSTANTS
// ================================================================================================

/// Number of 64-bit lanes in one block produced by [Pcg32x4].
pub const LANES: usize = 4;

/// Number of bits in the words that back a packed bit sequence.
pub const WORD_BITS: u64 = u64::BITS as u64;

// TESTS
// ================================================================================================
