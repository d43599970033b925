//! Keyset 'Differential' (`DiffTest`): for keys of width `W`, every
//! XOR-delta of Hamming weight at most `k` is tried against random keys,
//! looking for input deltas that induce an output collision far more often
//! than chance (`~2^-hash_bits` per trial).
//!
//! `(W, k)` pairs run by the standard suite: `(64, 5)`, `(128, 4)`, `(256, 3)`.

use crate::blob::Blob;
use crate::hash::HashDescriptor;
use crate::keysets::combinatorics::combinations;
use crate::rng::DeterministicRng;

/// The three standard `(key_width_bits, max_hamming_weight)` pairs.
pub const STANDARD_PARAMS: [(usize, u32); 3] = [(64, 5), (128, 4), (256, 3)];

/// RNG seed this sub-test draws its random keys from.
pub const STANDARD_SEED: u64 = 679_530;

/// Random keys tried per delta before moving on to the next one.
pub const TRIALS_PER_DELTA: usize = 100;

/// Every XOR-delta of `key_bits` width with Hamming weight in `1..=max_weight`,
/// as a stream of [`Blob`]s (weight 0 is skipped: the zero delta trivially
/// "collides" with itself and carries no signal).
pub fn deltas(key_bits: usize, max_weight: u32) -> impl Iterator<Item = Blob> {
    (1..=max_weight as usize).flat_map(move |weight| {
            combinations(key_bits, weight).map(move |positions| {
                    let mut blob = Blob::zero(key_bits);
                    for p in positions {
                        blob.set_bit(p, true);
                    }
                    blob
            })
    })
}

/// Exact number of deltas [`deltas`] yields for `(key_bits, max_weight)`,
/// i.e. `sum_{w=1}^{max_weight} C(key_bits, w)`. Lets a caller that only
/// samples a prefix of the delta stream report how much of it was skipped.
pub fn delta_count(key_bits: usize, max_weight: u32) -> u64 {
    (1..=max_weight as u64).map(|w| binomial(key_bits as u64, w)).sum()
}

fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}

/// One delta's observed collision count out of `TRIALS_PER_DELTA` random
/// keys, and whether it is a suspect (reports any delta with at least one
/// collision as a suspect).
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaResult {
    pub delta: Blob,
    pub collisions: usize,
    pub trials: usize,
}

impl DeltaResult {
    pub fn is_suspect(&self) -> bool {
        self.collisions >= 1
    }
}

/// Run the differential test for one `(key_bits, max_weight)` configuration
/// against `descriptor`, returning every delta flagged as a suspect.
///
/// `descriptor`'s `seed_bits` supplies a single fixed seed (drawn once from
/// the sub-test's RNG) shared by every trial, since the property under test
/// is input-delta sensitivity, not seed sensitivity.
pub fn run(descriptor: &HashDescriptor, key_bits: usize, max_weight: u32) -> Vec<DeltaResult> {
    let mut rng = DeterministicRng::new(STANDARD_SEED);
    let seed = Blob::from_rng(descriptor.seed_bits, &mut rng);
    let state = descriptor.prepare(&seed);

    let key_bytes = key_bits.div_ceil(8);
    let mut suspects = Vec::new();

    for delta in deltas(key_bits, max_weight) {
        let mut collisions = 0usize;
        for _ in 0..TRIALS_PER_DELTA {
            let key = Blob::from_rng(key_bits, &mut rng);
            let flipped = key.xor(&delta);
            let a = descriptor.compute_with(&key.as_bytes()[..key_bytes], state.as_ref());
            let b = descriptor.compute_with(&flipped.as_bytes()[..key_bytes], state.as_ref());
            if a == b {
                collisions += 1;
            }
        }
        if collisions >= 1 {
            suspects.push(DeltaResult { delta, collisions, trials: TRIALS_PER_DELTA });
        }
    }

    suspects
}
