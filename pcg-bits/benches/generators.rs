//! Generator throughput benchmarks
//!
//! Compares producing 256 bits of output per iteration three ways:
//! - `pcg64_next` - four calls of the scalar 64-bit generator
//! - `pcg32_next_x4` - eight calls spread over four scalar 32-bit generators
//! - `pcg32x4_next` - one call of the four-stream vector generator
//!
//! The vector benchmark name carries the kernel detected on the running CPU (`avx2` or
//! `portable`).

use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use pcg_bits::Kernel;

mod common;
use common::config::{DEFAULT_MEASUREMENT_TIME, DEFAULT_SAMPLE_SIZE};

/// Bytes of output produced by one iteration of every benchmark in this file.
const BLOCK_BYTES: u64 = 32;

fn generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generators");
    group.measurement_time(DEFAULT_MEASUREMENT_TIME);
    group.sample_size(DEFAULT_SAMPLE_SIZE);
    group.throughput(Throughput::Bytes(BLOCK_BYTES));

    group.bench_function("pcg64_next", |b| {
        let mut rng = common::pcg64();
        b.iter(|| black_box([rng.next(), rng.next(), rng.next(), rng.next()]))
    });

    group.bench_function("pcg32_next_x4", |b| {
        let mut lanes = common::pcg32_lanes();
        b.iter(|| {
            black_box(lanes.each_mut().map(|lane| {
                let low = lane.next();
                u64::from(low) | (u64::from(lane.next()) << 32)
            }))
        })
    });

    group.bench_function(format!("pcg32x4_next_{}", Kernel::detect().name()), |b| {
        let mut rng = common::vector();
        b.iter(|| black_box(rng.next()))
    });

    group.finish();
}

criterion_group!(generator_benchmarks, generators);
criterion_main!(generator_benchmarks);
