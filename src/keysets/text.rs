//! Keyset 'Text': `prefix + every string of length k over an alphabet
//! + suffix`. Three `(prefix, suffix)` configurations are run by the standard
//! suite, all sharing `k = 4` and the 62-character alphanumeric alphabet.
//!
//! RNG seed for the original driver is `543823`; like Window, this keyset is
//! exhaustive rather than randomly sampled, so the seed is unused here.

pub const STANDARD_SEED: u64 = 543823;
pub const ALPHANUMERIC: &[u8] =
b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
pub const K: usize = 4;

pub struct TextVariant {
    pub prefix: &'static [u8],
    pub suffix: &'static [u8],
}

pub const VARIANTS: [TextVariant; 3] = [
    TextVariant { prefix: b"Foo", suffix: b"Bar" },
    TextVariant { prefix: b"FooBar", suffix: b"" },
    TextVariant { prefix: b"", suffix: b"FooBar" },
];

/// Generate every key for one variant: `prefix + (every length-k string over
/// `alphabet`) + suffix`.
pub fn generate(variant: &TextVariant, alphabet: &'static [u8], k: usize) -> impl Iterator<Item = Vec<u8>> + '_ {
    crate::keysets::combinatorics::mixed_radix_product(alphabet.len(), k).map(move |indices| {
            let mut key = Vec::with_capacity(variant.prefix.len() + k + variant.suffix.len());
            key.extend_from_slice(variant.prefix);
            key.extend(indices.iter().map(|&i| alphabet[i]));
            key.extend_from_slice(variant.suffix);
            key
    })
}

/// Exact key count: `alphabet.len()^k`, independent of prefix/suffix.
pub fn key_count(alphabet_len: usize, k: usize) -> u64 {
    (alphabet_len as u64).pow(k as u32)
}
