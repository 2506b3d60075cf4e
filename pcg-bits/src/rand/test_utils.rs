//! Test and benchmark utilities.
//!
//! These helpers script entropy failures and feed samplers fixed or counted words, which the public
//! generators do not expose.

use rand_core::RngCore;

use crate::utils::entropy::EntropySource;

// SCRIPTED ENTROPY
// ================================================================================================

/// An [EntropySource] that replays a fixed script of read attempts.
///
/// `Some(word)` is a successful read and `None` a transient failure. Once the script runs out
/// every further attempt fails.
///
/// # Examples
/// ```
/// # use pcg_bits::{EntropySource, rand::test_utils::ScriptedEntropy};
/// let mut source = ScriptedEntropy::new(&[None, Some(7)]);
/// assert_eq!(source.next_word(), Ok(7));
/// assert_eq!(source.attempts(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedEntropy<'a> {
    script: &'a [Option<u64>],
    attempts: usize,
}

impl<'a> ScriptedEntropy<'a> {
    /// Returns a source replaying `script`.
    pub fn new(script: &'a [Option<u64>]) -> Self {
        Self { script, attempts: 0 }
    }

    /// Returns the number of read attempts made so far.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl EntropySource for ScriptedEntropy<'_> {
    fn try_next_word(&mut self) -> Option<u64> {
        let outcome = self.script.get(self.attempts).copied().flatten();
        self.attempts += 1;
        outcome
    }
}

// COUNTING RNG
// ================================================================================================

/// Wraps a generator and counts the words drawn from it.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    inner: R,
    calls: usize,
}

impl<R: RngCore> CountingRng<R> {
    /// Wraps `inner` with a zeroed counter.
    pub fn new(inner: R) -> Self {
        Self { inner, calls: 0 }
    }

    /// Returns the number of `next_u32` / `next_u64` calls forwarded so far.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.calls += 1;
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.calls += 1;
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }
}

// REPLAY RNG
// ================================================================================================

/// A [RngCore] that returns the words of a fixed slice in order, starting over at the end.
#[derive(Debug, Clone)]
pub struct ReplayRng<'a> {
    words: &'a [u64],
    position: usize,
}

impl<'a> ReplayRng<'a> {
    /// Returns a generator replaying `words`.
    ///
    /// # Panics
    /// Panics if `words` is empty.
    pub fn new(words: &'a [u64]) -> Self {
        assert!(!words.is_empty(), "nothing to replay");
        Self { words, position: 0 }
    }
}

impl RngCore for ReplayRng<'_> {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let word = self.words[self.position];
        self.position = (self.position + 1) % self.words.len();
        word
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }
}
