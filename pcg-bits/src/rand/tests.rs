use core::num::NonZeroU64;

use assert_matches::assert_matches;
use proptest::prelude::*;
use rand_core::RngCore;

use super::{Pcg32, Pcg64, test_utils::ScriptedEntropy};
use crate::utils::{
    entropy::{EntropyError, RDRAND_RETRIES},
    hash,
};

/// Number of draws compared by the determinism tests.
const BIG_SIMULATION: usize = 2_500_000;

fn seed(value: u64) -> NonZeroU64 {
    NonZeroU64::new(value).unwrap()
}

// PCG64
// ================================================================================================

#[test]
fn pcg64_matches_known_answers() {
    let mut rng = Pcg64::init(42).unwrap();
    let expected =
        [0xc2d8_5bb1_1df4_0d83, 0x2cec_8217_f0ad_5b0d, 0xd265_8b16_977d_2337, 0x9841_82e8_fe91_130b];

    for want in expected {
        assert_eq!(rng.next(), want);
    }
}

#[test]
fn pcg64_same_seed_same_stream() {
    let mut rng_1 = Pcg64::init(42).unwrap();
    let mut rng_2 = Pcg64::init(42).unwrap();

    for i in 0..BIG_SIMULATION {
        assert_eq!(rng_1.next(), rng_2.next(), "streams diverged at draw {i}");
    }
}

#[test]
fn pcg64_seeding_derives_state_and_increment_from_hash() {
    let rng = Pcg64::seeded(seed(7));
    let (state, increment) = rng.into_parts();

    assert_eq!(state, hash(7));
    assert_eq!(increment, hash(hash(7)) | 1);
    assert_eq!(Pcg64::init(7), Ok(rng));
}

#[test]
fn pcg64_next_only_advances_state() {
    let mut rng = Pcg64::seeded(seed(99));
    let (state, increment) = rng.into_parts();
    rng.next();

    let (next_state, next_increment) = rng.into_parts();
    assert_eq!(next_increment, increment);
    assert_eq!(next_state, state.wrapping_mul(0x5851_f42d_4c95_7f2d).wrapping_add(increment));
}

#[test]
fn pcg64_zero_seed_uses_hardware_entropy() {
    match (Pcg64::init(0), Pcg64::init(0)) {
        (Ok(rng_1), Ok(rng_2)) => {
            assert_eq!(rng_1.into_parts().1 & 1, 1);
            assert_ne!(rng_1, rng_2);
        },
        (Err(err), _) | (_, Err(err)) => assert_eq!(err, EntropyError::Unsupported),
    }
}

#[test]
fn pcg64_from_entropy_forces_odd_increment() {
    let script = [Some(5), Some(8)];
    let rng = Pcg64::from_entropy(&mut ScriptedEntropy::new(&script)).unwrap();

    assert_eq!(rng.into_parts(), (5, 9));
}

#[test]
fn pcg64_from_entropy_fails_when_increment_is_unavailable() {
    let script = [Some(5)];
    let mut source = ScriptedEntropy::new(&script);

    assert_matches!(Pcg64::from_entropy(&mut source), Err(EntropyError::Exhausted { .. }));
    assert_eq!(source.attempts(), 1 + RDRAND_RETRIES);
}

#[test]
fn pcg64_parts_round_trip() {
    let rng = Pcg64::from_parts(123, 457);
    assert_eq!(rng.into_parts(), (123, 457));
}

#[test]
#[should_panic(expected = "stream increment must be odd")]
fn pcg64_rejects_even_increment() {
    Pcg64::from_parts(0, 0);
}

#[test]
fn pcg64_rng_core_follows_next() {
    let mut rng = Pcg64::seeded(seed(3));
    let mut reference = rng;

    assert_eq!(rng.next_u64(), reference.next());
    assert_eq!(rng.next_u32(), reference.next() as u32);

    let mut bytes = [0u8; 12];
    rng.fill_bytes(&mut bytes);
    assert_eq!(bytes[..8], reference.next().to_le_bytes());
    assert_eq!(bytes[8..], reference.next().to_le_bytes()[..4]);
}

// PCG32
// ================================================================================================

#[test]
fn pcg32_matches_reference_recurrence() {
    let mut rng = Pcg32::seeded(seed(10));
    let (mut state, increment) = rng.into_parts();

    assert_eq!(state, hash(10) as u32);
    assert_eq!(increment, (hash(hash(10)) | 1) as u32);

    for _ in 0..1000 {
        let x = state;
        state = state.wrapping_mul(747_796_405).wrapping_add(increment);
        let fx = ((x >> ((x >> 28) + 4)) ^ x).wrapping_mul(277_803_737);
        assert_eq!(rng.next(), (fx >> 22) ^ fx);
    }
}

#[test]
fn pcg32_first_draws_from_seed_ten() {
    let mut rng = Pcg32::seeded(seed(10));
    assert_eq!(rng.next(), 0x2340_6184);
    assert_eq!(rng.next(), 0x90d8_cb89);
}

#[test]
fn pcg32_rng_core_packs_two_draws_per_word() {
    let mut rng = Pcg32::seeded(seed(10));
    assert_eq!(rng.next_u64(), 0x90d8_cb89_2340_6184);
}

#[test]
fn pcg32_from_entropy_keeps_low_halves() {
    let script = [Some(0x1234_5678_9abc_def0), Some(0xffff_ffff_0000_0002)];
    let rng = Pcg32::from_entropy(&mut ScriptedEntropy::new(&script)).unwrap();

    assert_eq!(rng.into_parts(), (0x9abc_def0, 3));
}

#[test]
#[should_panic(expected = "stream increment must be odd")]
fn pcg32_rejects_even_increment() {
    Pcg32::from_parts(1, 2);
}

proptest! {
    #[test]
    fn pcg64_increment_is_always_odd(value in 1u64..) {
        prop_assert_eq!(Pcg64::seeded(seed(value)).into_parts().1 & 1, 1);
    }

    #[test]
    fn pcg32_increment_is_always_odd(value in 1u64..) {
        prop_assert_eq!(Pcg32::seeded(seed(value)).into_parts().1 & 1, 1);
    }

    #[test]
    fn distinct_seeds_give_distinct_streams(a in 1u64.., b in 1u64..) {
        prop_assume!(a != b);
        let mut rng_a = Pcg64::seeded(seed(a));
        let mut rng_b = Pcg64::seeded(seed(b));
        let draws_a = [rng_a.next(), rng_a.next(), rng_a.next()];
        let draws_b = [rng_b.next(), rng_b.next(), rng_b.next()];
        prop_assert_ne!(draws_a, draws_b);
    }
}
