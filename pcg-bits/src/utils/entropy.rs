//! Hardware entropy used to seed generators non-deterministically.

use log::warn;
use thiserror::Error;

// CONSTANTS
// ================================================================================================

/// Number of attempts made for a single entropy word before giving up.
///
/// RDRAND may transiently report failure when its conditioner is drained; Intel documents ten
/// retries as sufficient for a healthy part.
pub const RDRAND_RETRIES: usize = 10;

// ERRORS
// ================================================================================================

/// Errors raised while seeding a generator from an entropy source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntropyError {
    #[error("hardware random number instruction is not available on this CPU")]
    Unsupported,
    #[error("entropy source failed to produce a word after {attempts} attempts")]
    Exhausted { attempts: usize },
}

// ENTROPY SOURCE
// ================================================================================================

/// A source of non-deterministic 64-bit words.
pub trait EntropySource {
    /// Makes a single attempt at reading one word; `None` signals a transient failure.
    fn try_next_word(&mut self) -> Option<u64>;

    /// Reads one word, retrying up to [RDRAND_RETRIES] times.
    ///
    /// # Errors
    /// Returns [EntropyError::Exhausted] if every attempt failed.
    fn next_word(&mut self) -> Result<u64, EntropyError> {
        for _ in 0..RDRAND_RETRIES {
            if let Some(word) = self.try_next_word() {
                return Ok(word);
            }
        }

        warn!("entropy source exhausted after {RDRAND_RETRIES} attempts");
        Err(EntropyError::Exhausted { attempts: RDRAND_RETRIES })
    }

    /// Fills `dest` with words, each read with the retry policy of [Self::next_word].
    ///
    /// On error the contents of `dest` are unspecified.
    fn fill_words(&mut self, dest: &mut [u64]) -> Result<(), EntropyError> {
        for word in dest.iter_mut() {
            *word = self.next_word()?;
        }
        Ok(())
    }
}

// HARDWARE ENTROPY
// ================================================================================================

/// The RDRAND instruction of x86_64 processors.
#[derive(Debug, Clone, Copy)]
pub struct HardwareEntropy {
    _private: (),
}

impl HardwareEntropy {
    /// Returns a handle to the hardware entropy instruction.
    ///
    /// # Errors
    /// Returns [EntropyError::Unsupported] if the running CPU does not implement RDRAND. Without
    /// the `std` feature detection happens at compile time from the enabled target features.
    pub fn new() -> Result<Self, EntropyError> {
        if rdrand_supported() {
            Ok(Self { _private: () })
        } else {
            warn!("RDRAND is not available, hardware seeding is disabled");
            Err(EntropyError::Unsupported)
        }
    }
}

impl EntropySource for HardwareEntropy {
    #[cfg(target_arch = "x86_64")]
    fn try_next_word(&mut self) -> Option<u64> {
        // SAFETY: a `HardwareEntropy` only exists once RDRAND support has been confirmed.
        unsafe { rdrand64_step() }
    }

    #[cfg(not(target_arch = "x86_64"))]
    fn try_next_word(&mut self) -> Option<u64> {
        None
    }
}

/// Reads one word from the hardware entropy instruction.
///
/// # Errors
/// Returns [EntropyError::Unsupported] if the CPU lacks RDRAND and [EntropyError::Exhausted] if
/// [RDRAND_RETRIES] consecutive reads failed.
pub fn hardware_random() -> Result<u64, EntropyError> {
    HardwareEntropy::new()?.next_word()
}

// HELPER FUNCTIONS
// ================================================================================================

#[cfg(all(target_arch = "x86_64", feature = "std"))]
fn rdrand_supported() -> bool {
    std::is_x86_feature_detected!("rdrand")
}

#[cfg(all(target_arch = "x86_64", not(feature = "std")))]
fn rdrand_supported() -> bool {
    cfg!(target_feature = "rdrand")
}

#[cfg(not(target_arch = "x86_64"))]
fn rdrand_supported() -> bool {
    false
}

// Newer toolchains treat the intrinsic as safe inside an `rdrand` function.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "rdrand")]
#[allow(unused_unsafe)]
unsafe fn rdrand64_step() -> Option<u64> {
    let mut value = 0u64;
    // SAFETY: the caller guarantees RDRAND support; `value` is a valid out pointer.
    let ok = unsafe { core::arch::x86_64::_rdrand64_step(&mut value) };
    (ok == 1).then_some(value)
}
