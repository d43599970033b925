//! Keyset 'Sparse': keys of a fixed bit-width `W` with at most `k`
//! nonzero bits, for the `(W, k)` pairs the original driver hand-tunes so the
//! resulting key count stays bounded: `(32,6) (40,6) (48,5) (56,5) (64,5)
//! (96,4) (256,3) (2048,2)`.

use crate::blob::Blob;
use crate::keysets::combinatorics::combinations;

/// The eight `(bit_width, max_nonzero_bits)` pairs run by the standard suite.
pub const SPARSE_PARAMS: [(usize, u32); 8] =
[(32, 6), (40, 6), (48, 5), (56, 5), (64, 5), (96, 4), (256, 3), (2048, 2)];

/// Generate every key of `bits` width with at most `max_ones` bits set, as a
/// lazily-produced stream (no upfront materialization, since `Sparse-2048`
/// would otherwise allocate millions of blobs at once).
pub fn generate(bits: usize, max_ones: u32) -> impl Iterator<Item = Blob> {
    (0..=max_ones as usize).flat_map(move |size| {
            combinations(bits, size).map(move |positions| {
                    let mut blob = Blob::zero(bits);
                    for p in positions {
                        blob.set_bit(p, true);
                    }
                    blob
            })
    })
}

/// Exact key count for `(bits, max_ones)`, i.e. `sum_{i=0}^{k} C(bits, i)`.
pub fn key_count(bits: usize, max_ones: u32) -> u64 {
    (0..=max_ones as u64).map(|i| binomial(bits as u64, i)).sum()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_have_at_most_k_bits_set() {
        for blob in generate(16, 3) {
            assert!(blob.count_ones() <= 3);
        }
    }

    #[test]
    fn count_matches_generated_length() {
        let bits = 10;
        let max_ones = 3;
        let generated: Vec<Blob> = generate(bits, max_ones).collect();
        assert_eq!(generated.len() as u64, key_count(bits, max_ones));
    }

    #[test]
    fn all_generated_keys_are_distinct() {
        let keys: Vec<Blob> = generate(12, 2).collect();
        let unique: std::collections::HashSet<_> = keys.iter().cloned().collect();
        assert_eq!(keys.len(), unique.len());
    }

    #[test]
    fn zero_ones_yields_only_the_zero_key() {
        let keys: Vec<Blob> = generate(32, 0).collect();
        assert_eq!(keys, vec![Blob::zero(32)]);
    }

    #[test]
    fn standard_params_have_bounded_key_counts() {
        for &(bits, k) in &SPARSE_PARAMS {
            let count = key_count(bits, k);
            assert!(count > 0);
            // Sanity bound: none of the standard pairs should explode past the
            // tens-of-millions the orchestrator budgets for.
            assert!(count < 50_000_000, "{bits},{k} => {count}");
        }
    }
}
