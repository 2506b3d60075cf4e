//! Shared configuration and inputs for the benchmark binaries.

#![allow(dead_code)]

use std::{num::NonZeroU64, time::Duration};

use pcg_bits::{Pcg32, Pcg32x4, Pcg64, bias};

// === Configuration ===

pub mod config {
    use super::Duration;

    /// Measurement time for generator and sampler benchmarks.
    pub const DEFAULT_MEASUREMENT_TIME: Duration = Duration::from_secs(5);

    /// Number of samples criterion collects per benchmark.
    pub const DEFAULT_SAMPLE_SIZE: usize = 100;

    /// Lengths, in bits, of the streams fed to the bitstream benchmarks.
    pub const STREAM_BITS: &[u64] = &[1 << 10, 1 << 14, 1 << 18];
}

// === Generators ===

const SEED: u64 = 0x5eed_0f_b175;

/// Scalar 64-bit generator with a fixed seed.
pub fn pcg64() -> Pcg64 {
    Pcg64::seeded(nonzero(SEED))
}

/// Four scalar 32-bit generators seeded like the lanes of [vector].
pub fn pcg32_lanes() -> [Pcg32; 4] {
    lane_seeds().map(Pcg32::seeded)
}

/// Four-stream vector generator with fixed seeds.
pub fn vector() -> Pcg32x4 {
    Pcg32x4::seeded(lane_seeds())
}

fn lane_seeds() -> [NonZeroU64; 4] {
    [SEED, SEED + 1, SEED + 2, SEED + 3].map(nonzero)
}

fn nonzero(value: u64) -> NonZeroU64 {
    NonZeroU64::new(value).expect("benchmark seeds are non-zero")
}

// === Bit streams ===

/// Returns `bits` bits, each set with probability `n / 2^m`, packed into words.
pub fn biased_stream(bits: u64, n: u64, m: u32) -> Vec<u64> {
    let mut rng = pcg64();
    (0..bits.div_ceil(64)).map(|_| bias(&mut rng, n, m)).collect()
}
