//! Keyset 'Combination': given a palette of `m` 32-bit blocks and a
//! length `n`, enumerate all `m^n` keys formed by concatenating `n` blocks
//! drawn (with repetition) from the palette. Five palette/length variants are
//! run by the standard suite, named after the bit patterns they stress.

/// One variant's palette and concatenation length, plus the RNG seed the
/// original driver constructs (unused by the generator itself — kept here so
/// callers building the full sub-test can cite the literal alongside its
/// palette rather than threading it through a second table).
pub struct CombinationVariant {
    pub name: &'static str,
    pub blocks: &'static [u32],
    pub n: usize,
    pub seed: u64,
}

pub const VARIANTS: [CombinationVariant; 5] = [
    CombinationVariant {
        name: "lowbits",
        blocks: &[0x0000_0000, 0x0000_0001, 0x0000_0002, 0x0000_0003, 0x0000_0004, 0x0000_0005, 0x0000_0006, 0x0000_0007],
        n: 8,
        seed: 4_810_489,
    },
    CombinationVariant {
        name: "highbits",
        blocks: &[0x0000_0000, 0x2000_0000, 0x4000_0000, 0x6000_0000, 0x8000_0000, 0xA000_0000, 0xC000_0000, 0xE000_0000],
        n: 8,
        seed: 9_104_174,
    },
    CombinationVariant {
        name: "single-bit-high",
        blocks: &[0x0000_0000, 0x8000_0000],
        n: 20,
        seed: 183_235,
    },
    CombinationVariant {
        name: "single-bit-low",
        blocks: &[0x0000_0000, 0x0000_0001],
        n: 20,
        seed: 831_951,
    },
    CombinationVariant {
        name: "hi-lo",
        blocks: &[
            0x0000_0000, 0x0000_0001, 0x0000_0002, 0x0000_0003, 0x0000_0004, 0x0000_0005, 0x0000_0006, 0x0000_0007,
            0x8000_0000, 0x4000_0000, 0xC000_0000, 0x2000_0000, 0xA000_0000, 0x6000_0000, 0xE000_0000,
        ],
        n: 6,
        seed: 47_831,
    },
];

/// Generate every key for one variant: each key is `n` 32-bit blocks,
/// little-endian-concatenated, chosen with repetition from `blocks`.
pub fn generate(variant: &CombinationVariant) -> impl Iterator<Item = Vec<u8>> + '_ {
    crate::keysets::combinatorics::mixed_radix_product(variant.blocks.len(), variant.n).map(
        move |indices| {
            let mut key = Vec::with_capacity(variant.n * 4);
            for idx in indices {
                key.extend_from_slice(&variant.blocks[idx].to_le_bytes());
            }
            key
        },
    )
}

/// Exact key count for a variant: `blocks.len() ^ n`.
pub fn key_count(variant: &CombinationVariant) -> u64 {
    (variant.blocks.len() as u64).pow(variant.n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_has_a_nonempty_palette() {
        for variant in &VARIANTS {
            assert!(!variant.blocks.is_empty());
            assert!(variant.blocks.contains(&0));
        }
    }

    #[test]
    fn single_bit_low_generates_two_to_the_twenty_keys() {
        let variant = &VARIANTS[3];
        assert_eq!(key_count(variant), 1 << 20);
    }

    #[test]
    fn generated_keys_have_the_right_byte_length() {
        let variant = &VARIANTS[0];
        for key in generate(variant).take(100) {
            assert_eq!(key.len(), variant.n * 4);
        }
    }

    #[test]
    fn all_zero_indices_yield_the_all_zero_key() {
        let variant = &VARIANTS[0];
        let first = generate(variant).next().unwrap();
        assert!(first.iter().all(|&b| b == 0));
    }
}
