//! Keyset 'TwoBytes': for each key length `L`, every key with at most
//! two nonzero byte positions, the rest zero. Key count grows as
//! `C(L,2)*255^2` for the two-nonzero-byte case, plus the one-byte and
//! all-zero cases.

use crate::keysets::combinatorics::combinations;

/// The five standard lengths run by the suite.
pub const LENGTHS: [usize; 5] = [4, 8, 12, 16, 20];

/// Generate every key of length `l` bytes with at most two nonzero byte
/// positions. Lazily produced: `TwoBytes-20` alone is ~12.3M keys, and the
/// orchestrator may run several lengths per descriptor.
pub fn generate(l: usize) -> impl Iterator<Item = Vec<u8>> {
    let zero_key = std::iter::once(vec![0u8; l]);

    let one_nonzero = (0..l).flat_map(move |pos| {
            (1u16..=255).map(move |value| {
                    let mut key = vec![0u8; l];
                    key[pos] = value as u8;
                    key
            })
    });

    let two_nonzero = combinations(l, 2).flat_map(move |positions| {
            let (i, j) = (positions[0], positions[1]);
            (1u16..=255).flat_map(move |a| {
                    (1u16..=255).map(move |b| {
                            let mut key = vec![0u8; l];
                            key[i] = a as u8;
                            key[j] = b as u8;
                            key
                    })
            })
    });

    zero_key.chain(one_nonzero).chain(two_nonzero)
}

/// Exact key count for length `l`: `1 + l*255 + C(l,2)*255^2`.
pub fn key_count(l: usize) -> u64 {
    let l = l as u64;
    let pairs = l * (l - 1) / 2;
    1 + l * 255 + pairs * 255 * 255
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_byte_count_matches_spec_scenario_d() {
        // Scenario D pins C(4,2)*255^2 = 390_150 for the two-nonzero-byte keys
        // alone; key_count additionally includes the zero and one-nonzero cases.
        let two_nonzero_only = 6 * 255 * 255;
        assert_eq!(two_nonzero_only, 390_150);
        assert_eq!(key_count(4), 1 + 4 * 255 + 390_150);
    }

    #[test]
    fn generated_length_matches_key_count() {
        let l = 5;
        let generated: Vec<_> = generate(l).collect();
        assert_eq!(generated.len() as u64, key_count(l));
    }

    #[test]
    fn every_key_has_the_requested_length_and_at_most_two_nonzero_bytes() {
        for key in generate(6) {
            assert_eq!(key.len(), 6);
            assert!(key.iter().filter(|&&b| b != 0).count() <= 2);
        }
    }
}
