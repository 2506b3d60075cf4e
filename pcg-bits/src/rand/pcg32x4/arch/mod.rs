//! Kernels advancing the four streams of a [Pcg32x4](super::Pcg32x4).
//!
//! The AVX2 kernel is chosen whenever the running CPU supports it, detected at runtime under
//! `std` and from the enabled target features otherwise. The portable lane loop covers every
//! other case. Both produce identical bits.

use crate::LANES;

pub mod portable;

#[cfg(target_arch = "x86_64")]
mod x86_64_avx2;

// KERNEL
// ================================================================================================

/// Implementation used to advance the four streams of a [Pcg32x4](super::Pcg32x4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// All four streams in one 256-bit register.
    Avx2,
    /// One stream at a time.
    Portable,
}

impl Kernel {
    /// Returns the fastest kernel supported by the running CPU.
    pub fn detect() -> Self {
        if avx2_supported() { Self::Avx2 } else { Self::Portable }
    }

    /// Returns the short name of this kernel.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Avx2 => "avx2",
            Self::Portable => "portable",
        }
    }

    /// Advances every stream twice and returns the packed block.
    ///
    /// Generators take their kernel from [Kernel::detect] only, so the vector path never runs on a
    /// CPU without AVX2.
    #[inline]
    pub(crate) fn next_block(
        self,
        state: &mut [u64; LANES],
        increment: &[u64; LANES],
    ) -> [u64; LANES] {
        match self {
            #[cfg(target_arch = "x86_64")]
            // SAFETY: `Avx2` is only selected after AVX2 support has been confirmed.
            Self::Avx2 => unsafe { x86_64_avx2::next_block(state, increment) },
            _ => portable::next_block(state, increment),
        }
    }
}

// HELPER FUNCTIONS
// ================================================================================================

#[cfg(all(target_arch = "x86_64", feature = "std"))]
fn avx2_supported() -> bool {
    std::is_x86_feature_detected!("avx2")
}

#[cfg(all(target_arch = "x86_64", not(feature = "std")))]
fn avx2_supported() -> bool {
    cfg!(target_feature = "avx2")
}

#[cfg(not(target_arch = "x86_64"))]
fn avx2_supported() -> bool {
    false
}
