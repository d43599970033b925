//! Keyset 'Sanity': the basic correctness contract every hash must
//! satisfy before the statistical sub-tests are worth running at all.
//!
//! Three properties, each checked over a batch of random (key, seed) pairs:
//! hashing twice under the same seed is bitwise reproducible; hashing under
//! two different seeds is (overwhelmingly) different; and appending extra
//! bytes to a key changes the hash (`AppendedZeroes`).

use crate::blob::Blob;
use crate::hash::HashDescriptor;
use crate::rng::DeterministicRng;

/// RNG seed this sub-test constructs its own keys and seeds from.
pub const STANDARD_SEED: u64 = 146_219;

/// Number of random trials run per property.
pub const STANDARD_TRIAL_COUNT: usize = 10_000;

/// Outcome of the Sanity sub-test: each property is checked independently so
/// a caller can report which specific contract broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanityResult {
    pub reproducible: bool,
    pub seed_sensitive: bool,
    pub appended_zeroes_sensitive: bool,
}

impl SanityResult {
    pub fn passes(&self) -> bool {
        self.reproducible && self.seed_sensitive && self.appended_zeroes_sensitive
    }
}

/// Run the Sanity contract against `descriptor` using `trial_count` random
/// (key, seed) pairs drawn from a fresh [`DeterministicRng`] seeded with
/// [`STANDARD_SEED`].
pub fn run(descriptor: &HashDescriptor, trial_count: usize) -> SanityResult {
    let mut rng = DeterministicRng::new(STANDARD_SEED);

    let reproducible = (0..trial_count).all(|_| {
        let key = random_key(&mut rng);
        let seed = Blob::from_rng(descriptor.seed_bits, &mut rng);
        descriptor.compute(&key, &seed) == descriptor.compute(&key, &seed)
    });

    // A genuine hash will disagree on essentially every trial when the seed
    // changes; tolerate the astronomically unlikely accidental agreement by
    // requiring at most one match out of `trial_count`.
    let mut seed_mismatches = 0usize;
    for _ in 0..trial_count {
        let key = random_key(&mut rng);
        let seed_a = Blob::from_rng(descriptor.seed_bits, &mut rng);
        let seed_b = Blob::from_rng(descriptor.seed_bits, &mut rng);
        if descriptor.compute(&key, &seed_a) != descriptor.compute(&key, &seed_b) {
            seed_mismatches += 1;
        }
    }
    let seed_sensitive = seed_mismatches >= trial_count.saturating_sub(1);

    let mut appended_mismatches = 0usize;
    for _ in 0..trial_count {
        let key = random_key(&mut rng);
        let seed = Blob::from_rng(descriptor.seed_bits, &mut rng);
        let mut extended = key.clone();
        extended.push(0);
        if descriptor.compute(&key, &seed) != descriptor.compute(&extended, &seed) {
            appended_mismatches += 1;
        }
    }
    let appended_zeroes_sensitive = appended_mismatches >= trial_count.saturating_sub(1);

    SanityResult { reproducible, seed_sensitive, appended_zeroes_sensitive }
}

fn random_key(rng: &mut DeterministicRng) -> Vec<u8> {
    let len = 1 + rng.gen_below(32);
    let mut key = vec![0u8; len];
    rng.fill_bytes(&mut key);
    key
}
