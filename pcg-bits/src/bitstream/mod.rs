//! Transforms and statistics over packed bit sequences.
//!
//! Sequences use the layout of [BitArray]: bit `i` is bit `i % 64` of word `i / 64`.

use crate::utils::bits::BitArray;


// CONSTANTS
// ================================================================================================

/// Mask selecting one source pair for [debias].
const PAIR_MASK: u64 = 0b11;

/// Pair value with the lower-addressed bit set and the higher one clear.
const PAIR_ONE_ZERO: u64 = 0b01;

/// Pair value with the lower-addressed bit clear and the higher one set.
const PAIR_ZERO_ONE: u64 = 0b10;

// STREAM TRANSFER
// ================================================================================================

/// Outcome of a transform reading from one bit sequence and writing to another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StreamTransfer {
    /// Number of source bits consumed.
    pub used: u64,
    /// Number of destination bits written.
    pub filled: u64,
}

// VON NEUMANN DEBIASING
// ================================================================================================

/// Removes the bias of independent bits from `src` and writes the result into `dest`.
///
/// The first `n` bits of `src` are read as consecutive non-overlapping pairs. A (1, 0) pair writes
/// a 1, a (0, 1) pair writes a 0, where the first element is the lower-addressed bit; equal pairs
/// are dropped. Reading stops once `m` bits are written or the source runs out, so the returned
/// [StreamTransfer::filled] may fall short of `m`. The words of `dest` covering the first `m`
/// bits are cleared before writing.
///
/// Correlation between source bits is not removed.
///
/// # Panics
/// Panics if `n` is zero or odd, if `m` is zero, or if the slices hold fewer than `n` and `m`
/// bits.
pub fn debias(src: &[u64], dest: &mut [u64], n: u64, m: u64) -> StreamTransfer {
    assert!(n != 0, "nothing to read");
    assert!(m != 0, "nowhere to write");
    assert!(n % 2 == 0, "cannot process odd-length bitstream");
    assert!(fits(src, n), "source holds fewer than {n} bits");
    assert!(fits(dest, m), "destination holds fewer than {m} bits");

    dest.clear_prefix(m);

    let mut transfer = StreamTransfer::default();
    while transfer.used < n && transfer.filled < m {
        match src.mask_at(transfer.used, PAIR_MASK) {
            PAIR_ONE_ZERO => {
                dest.set_bit(transfer.filled);
                transfer.filled += 1;
            },
            PAIR_ZERO_ONE => transfer.filled += 1,
            _ => {},
        }
        transfer.used += 2;
    }

    transfer
}

// AUTOCORRELATION
// ================================================================================================

/// Returns the lag-`k` serial correlation coefficient of the first `n` bits of `src`, treated as
/// a cycle.
///
/// With `x2` the number of set bits and `x1` the number of positions `i` where both bit `i` and
/// bit `(i + k) mod n` are set, the coefficient is `(n·x1 − x2²) / (n·x2 − x2²)`, which lies in
/// `[-1, 1]`.
///
/// Returns `None` when every bit is 0 or every bit is 1: the denominator is then zero and the
/// coefficient is undefined.
///
/// # Panics
/// Panics if `n` is zero, `k >= n`, or `src` holds fewer than `n` bits.
pub fn autocorrelation(src: &[u64], n: u64, k: u64) -> Option<f64> {
    assert!(n != 0, "no data");
    assert!(k < n, "lag {k} exceeds length of data {n}");
    assert!(fits(src, n), "source holds fewer than {n} bits");

    let mut x1 = 0u64;
    let mut x2 = 0u64;
    for i in 0..n {
        if src.test_bit(i) {
            x2 += 1;
            if src.test_bit((i + k) % n) {
                x1 += 1;
            }
        }
    }

    // exact integer numerator and denominator; |numerator| <= denominator always holds
    let (n, x1, x2) = (i128::from(n), i128::from(x1), i128::from(x2));
    let denominator = n * x2 - x2 * x2;
    if denominator == 0 {
        return None;
    }

    let coefficient = (n * x1 - x2 * x2) as f64 / denominator as f64;
    debug_assert!((-1.0..=1.0).contains(&coefficient), "coefficient {coefficient} out of range");
    Some(coefficient)
}

// HELPER FUNCTIONS
// ================================================================================================

#[inline(always)]
fn fits(words: &[u64], bits: u64) -> bool {
    (words.len() as u64).saturating_mul(crate::WORD_BITS) >= bits
}
