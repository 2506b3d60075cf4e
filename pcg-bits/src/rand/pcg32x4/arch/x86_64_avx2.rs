// Inside `avx2` functions most intrinsics are safe to call on newer toolchains, which would
// otherwise flag the blocks.
#![allow(unused_unsafe)]

use core::arch::x86_64::*;

use crate::{
    LANES,
    rand::pcg32::{MULTIPLIER, OUTPUT_MULTIPLIER},
};

// CONSTANTS
// ================================================================================================

const LOW_HALF: i64 = 0xffff_ffff;

// KERNEL
// ================================================================================================

/// Advances the four streams twice inside one YMM register.
///
/// Only the low 32 bits of every 64-bit lane carry state. `_mm256_mul_epu32` multiplies exactly
/// those halves and the product is masked back to 32 bits, so the high halves stay zero and can
/// receive the second draw.
///
/// # Safety
/// The running CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub unsafe fn next_block(state: &mut [u64; LANES], increment: &[u64; LANES]) -> [u64; LANES] {
    unsafe {
        let mut x = load4(state);
        let inc = load4(increment);

        let lower = next_partial(&mut x, inc);
        let upper = next_partial(&mut x, inc);
        store4(state, x);

        let mut block = [0u64; LANES];
        store4(&mut block, _mm256_or_si256(_mm256_slli_epi64::<32>(upper), lower));
        block
    }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn next_partial(state: &mut __m256i, increment: __m256i) -> __m256i {
    unsafe {
        let lcg_mult = _mm256_set1_epi64x(MULTIPLIER as i64);
        let rxs_mult = _mm256_set1_epi64x(OUTPUT_MULTIPLIER as i64);
        let low_half = _mm256_set1_epi64x(LOW_HALF);

        // permutation of the pre-update state
        let x = *state;
        let shift = _mm256_add_epi32(_mm256_srli_epi32::<28>(x), _mm256_set1_epi32(4));
        let mut fx = _mm256_xor_si256(x, _mm256_srlv_epi32(x, shift));
        fx = _mm256_and_si256(_mm256_mul_epu32(fx, rxs_mult), low_half);
        fx = _mm256_xor_si256(_mm256_srli_epi32::<22>(fx), fx);

        // lcg transition
        let next = _mm256_and_si256(_mm256_mul_epu32(x, lcg_mult), low_half);
        *state = _mm256_and_si256(_mm256_add_epi64(next, increment), low_half);

        fx
    }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load4(src: &[u64; LANES]) -> __m256i {
    unsafe { _mm256_loadu_si256(src.as_ptr().cast::<__m256i>()) }
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn store4(dst: &mut [u64; LANES], value: __m256i) {
    unsafe { _mm256_storeu_si256(dst.as_mut_ptr().cast::<__m256i>(), value) }
}
