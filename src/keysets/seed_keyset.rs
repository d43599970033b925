//! Keyset 'Seed': a single fixed key hashed under `seed_count`
//! distinct seeds drawn from the RNG, measuring whether varying the seed
//! alone (holding the key fixed) produces a well-distributed set of outputs.

use crate::blob::Blob;
use crate::rng::DeterministicRng;

/// RNG seed this sub-test constructs its own seed stream from.
pub const STANDARD_SEED: u64 = 392_612;

/// Number of distinct seeds drawn in the standard suite.
pub const STANDARD_SEED_COUNT: usize = 2_000_000;

/// The fixed key every seed is tried against.
pub const FIXED_KEY: &[u8] = b"smhasher-seed-test-key";

/// Draw `seed_count` seeds of `seed_bits` width from a fresh RNG seeded with
/// [`STANDARD_SEED`].
pub fn generate(seed_bits: usize, seed_count: usize) -> Vec<Blob> {
    let mut rng = DeterministicRng::new(STANDARD_SEED);
    (0..seed_count).map(|_| Blob::from_rng(seed_bits, &mut rng)).collect()
}
