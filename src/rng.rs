//! Deterministic random bit source used by every keyset generator.
//!
//! Reproducibility is the entire contract: for a given seed integer, the k-th
//! 32-/64-bit draw must be identical across runs and platforms, so that a keyset
//! generated today is bit-for-bit the same keyset generated tomorrow, on any
//! machine. Each sub-test constructs a fresh [`DeterministicRng`] from a literal
//! integer seed embedded in that sub-test (e.g. `910203` for Cyclic).

use rand_core::{RngCore, SeedableRng};

/// Uses the rapidhash V1 seed/secret constants purely as a source of well-mixed
/// bits; no compatibility with rapidhash's own hash output is implied or required.
const MIX_SEED: u64 = 0xbdd89aa982704029;
const MIX_SECRET: [u64; 2] = [0x2d358dccaa6c78a5, 0x8bb84b93962eacc9];

/// A fast, deterministic, non-cryptographic PRNG seeded by a 64-bit integer.
///
/// This is the RNG every keyset generator draws entropy from. It is not suitable
/// as a general-purpose RNG outside this crate: its only design goal is
/// reproducible, reasonably well-distributed output at high throughput, since
/// generators may draw tens of millions of words per sub-test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Create a new RNG from a literal integer seed.
    ///
    /// The seed is folded through one mixing round before use so that small or
    /// sequential seeds (`0`, `1`, `2`,...) do not produce correlated initial
    /// output.
    #[inline]
    pub fn new(seed: u64) -> Self {
        let mut state = seed ^ MIX_SEED;
        state = mix(state, state ^ MIX_SECRET[0]);
        Self { state }
    }

    /// Draw the next 64-bit word and advance the state.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(MIX_SECRET[0]);
        mix(self.state, self.state ^ MIX_SECRET[1])
    }

    /// Draw the next 32-bit word and advance the state.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Fill `dest` with random bytes by repeated 64-bit draws.
    pub fn fill_bytes(&mut self, dest: &mut [u8]) {
        let mut chunks = dest.chunks_exact_mut(8);
        for chunk in &mut chunks {
            chunk.copy_from_slice(&self.next_u64().to_le_bytes());
        }
        let remainder = chunks.into_remainder();
        if !remainder.is_empty() {
            let word = self.next_u64().to_le_bytes();
            remainder.copy_from_slice(&word[..remainder.len()]);
        }
    }

    /// Draw a `usize` uniformly in `[0, bound)`. Used to pick random positions
    /// (e.g. a byte offset, a window start) without introducing modulo bias for
    /// the bound sizes this crate deals with (at most a few million).
    pub fn gen_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        (self.next_u64() % bound as u64) as usize
    }

    /// Draw a random byte.
    pub fn gen_byte(&mut self) -> u8 {
        self.next_u64() as u8
    }
}

/// A single mixing round: multiply-high-xor-low over a 128-bit product.
///
/// This is the same style of folded-multiply avalanche step used throughout the
/// corpus's fast hash implementations, reused here purely as a bit mixer.
#[inline(always)]
fn mix(x: u64, y: u64) -> u64 {
    let product = (x as u128).wrapping_mul(y as u128);
    ((product >> 64) as u64) ^ (product as u64)
}

impl RngCore for DeterministicRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        DeterministicRng::next_u32(self)
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        DeterministicRng::next_u64(self)
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        DeterministicRng::fill_bytes(self, dest)
    }
}

impl SeedableRng for DeterministicRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
