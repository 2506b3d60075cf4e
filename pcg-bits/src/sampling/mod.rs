//! Samplers drawing from any [RngCore].
//!
//! The probability of a Bernoulli trial is given as a binary fraction `p = n / 2^m` with
//! `0 < n < 2^m` and `0 < m <= 64`. Smaller `m` means fewer generator calls per sample.

use rand_core::RngCore;


// CONSTANTS
// ================================================================================================

/// Number of Bernoulli trials packed into one word by [bias].
pub const TRIALS_PER_WORD: u64 = u64::BITS as u64;

// BIT RNG
// ================================================================================================

/// Bit-level sampling on top of a [RngCore].
///
/// Implemented for every [RngCore]; the methods forward to the free functions of this module.
pub trait BitRng: RngCore {
    /// See [bias].
    fn bias(&mut self, n: u64, m: u32) -> u64 {
        bias(self, n, m)
    }

    /// See [binomial].
    fn binomial(&mut self, trials: u64, n: u64, m: u32) -> u64 {
        binomial(self, trials, n, m)
    }

    /// See [uniform_in_range].
    fn uniform_in_range(&mut self, min: u64, max: u64) -> u64 {
        uniform_in_range(self, min, max)
    }
}

impl<R: RngCore + ?Sized> BitRng for R {}

// SAMPLERS
// ================================================================================================

/// Returns 64 independent Bernoulli trials with success probability `n / 2^m`, one per bit.
///
/// Bits of `n` are read from the lowest set bit up to bit `m - 1`. Each one draws a fresh word
/// which is AND-ed into the accumulator for a 0 bit and OR-ed for a 1 bit. Every AND halves the
/// probability of a set bit and every OR averages it with one, so after the last step each bit of
/// the accumulator is set with probability exactly `n / 2^m`. The generator is called
/// `m - n.trailing_zeros()` times.
///
/// # Panics
/// Panics if `n` is zero, `m` is outside `1..=64`, or `n >= 2^m`.
pub fn bias<R: RngCore + ?Sized>(rng: &mut R, n: u64, m: u32) -> u64 {
    assert_probability(n, m);

    let mut accumulator = 0;
    for pc in n.trailing_zeros()..m {
        if (n >> pc) & 1 == 0 {
            accumulator &= rng.next_u64();
        } else {
            accumulator |= rng.next_u64();
        }
    }

    accumulator
}

/// Returns the number of successes in `trials` Bernoulli trials with probability `n / 2^m`.
///
/// Trials are simulated 64 at a time with [bias]. The last word is shifted right so that only
/// its top `trials mod 64` bits are counted (all 64 when the remainder is zero).
///
/// # Panics
/// Panics if `trials` is zero or the probability is invalid (see [bias]).
pub fn binomial<R: RngCore + ?Sized>(rng: &mut R, mut trials: u64, n: u64, m: u32) -> u64 {
    assert!(trials != 0, "no trials");
    assert_probability(n, m);

    let mut successes = 0;
    while trials > TRIALS_PER_WORD {
        successes += u64::from(bias(rng, n, m).count_ones());
        trials -= TRIALS_PER_WORD;
    }

    successes + u64::from((bias(rng, n, m) >> (TRIALS_PER_WORD - trials)).count_ones())
}

/// Returns an integer drawn uniformly from `min..=max`.
///
/// Uses bitmask rejection: each word is masked down to the smallest all-ones mask covering
/// `max - min` and kept only if it does not exceed that range. Rejected words are discarded
/// whole. Fewer than two draws are needed on average.
///
/// # Panics
/// Panics if `min >= max`.
pub fn uniform_in_range<R: RngCore + ?Sized>(rng: &mut R, min: u64, max: u64) -> u64 {
    assert!(min < max, "bounds violation: {min} >= {max}");

    let range = max - min;
    let mask = u64::MAX >> range.leading_zeros();
    debug_assert_eq!(mask.leading_zeros(), range.leading_zeros());

    loop {
        let sample = rng.next_u64() & mask;
        if sample <= range {
            return sample + min;
        }
    }
}

// HELPER FUNCTIONS
// ================================================================================================

#[inline(always)]
fn assert_probability(n: u64, m: u32) {
    assert!(n != 0, "probability is 0");
    assert!((1..=64).contains(&m), "invalid base 2 exponent {m}");
    assert!(m == 64 || n >> m == 0, "probability {n} / 2^{m} is not below 1");
}
