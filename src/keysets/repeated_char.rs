//! Keyset 'Repeated-Char': `keycount` keys, each `n` repetitions of a
//! single byte value `b`, `b` drawn from `{0x00, 0xFF}` (the "Zeroes" and
//! "Effs" sub-test flags). Length varies per key across a fixed range
//! so the keyset probes how a hash handles long, maximally repetitive input.

/// The two byte values the standard suite repeats: `Zeroes` and `Effs`.
pub const STANDARD_BYTES: [u8; 2] = [0x00, 0xFF];

/// RNG seeds the original driver constructs for `Zeroes` and `Effs`
/// respectively; unused by generation itself since lengths are enumerated,
/// not sampled, but preserved here as the literal the sub-test is keyed by.
pub const ZEROES_SEED: u64 = 834_192;
pub const EFFS_SEED: u64 = 4_139_126;

/// Shortest and longest repetition count generated; one key per length in
/// this (inclusive) range, so `keycount = max_len - min_len + 1`.
pub const MIN_LEN: usize = 1;
pub const MAX_LEN: usize = 2048;

/// Generate one key per length in `[MIN_LEN, MAX_LEN]`, each `n` copies of `b`.
pub fn generate(b: u8) -> impl Iterator<Item = Vec<u8>> {
    (MIN_LEN..=MAX_LEN).map(move |n| vec![b; n])
}

/// Number of keys [`generate`] produces.
pub fn key_count() -> usize {
    MAX_LEN - MIN_LEN + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_one_key_per_length() {
        let keys: Vec<_> = generate(0x00).collect();
        assert_eq!(keys.len(), key_count());
        assert_eq!(keys[0].len(), MIN_LEN);
        assert_eq!(keys.last().unwrap().len(), MAX_LEN);
    }

    #[test]
    fn every_byte_in_every_key_matches_the_repeated_value() {
        for key in generate(0xFF).take(50) {
            assert!(key.iter().all(|&byte| byte == 0xFF));
        }
    }

    #[test]
    fn zeroes_and_effs_use_distinct_byte_values() {
        assert_ne!(STANDARD_BYTES[0], STANDARD_BYTES[1]);
    }
}
