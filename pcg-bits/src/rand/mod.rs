//! Pseudo-random number generators.
//!
//! All generators here are permuted congruential generators (PCG) using the RXS-M-XS output
//! permutation: a linear congruential state transition followed by a variable xorshift, an odd
//! multiply and a fixed xorshift applied to the pre-update state.
//!
//! Generators are plain values owned by the caller. They hold no process-wide state and perform
//! no allocation; a generator shared between threads needs external synchronization.

mod pcg32;
pub use pcg32::Pcg32;

mod pcg32x4;
pub use pcg32x4::{Kernel, Pcg32x4};

mod pcg64;
pub use pcg64::Pcg64;

// Test utilities for scripting entropy failures and replaying fixed words (used in tests and
// doctests)
#[cfg(any(test, feature = "std"))]
pub mod test_utils;

#[cfg(test)]
mod tests;

