use crate::{
    LANES,
    rand::pcg32::{advance, permute},
};

/// Advances each lane twice, packing the first output into the low half of the output lane and
/// the second into the high half.
#[inline]
pub fn next_block(state: &mut [u64; LANES], increment: &[u64; LANES]) -> [u64; LANES] {
    let lower = next_partial(state, increment);
    let upper = next_partial(state, increment);
    core::array::from_fn(|i| (upper[i] << 32) | lower[i])
}

#[inline(always)]
fn next_partial(state: &mut [u64; LANES], increment: &[u64; LANES]) -> [u64; LANES] {
    core::array::from_fn(|i| {
        let x = state[i] as u32;
        state[i] = u64::from(advance(x, increment[i] as u32));
        u64::from(permute(x))
    })
}
