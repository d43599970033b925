//! Keyset 'Window': key width `2*hash_bits`. For each window offset
//! `o` in `[0, 2*hash_bits)`, every key whose bits are zero outside a 20-bit
//! window starting at `o` (wrapping around the key width if the window would
//! run past the end).
//!
//! Seed for the original driver's RNG is `77589`; unused by key generation
//! itself since every value in the window is enumerated exhaustively.

use crate::blob::Blob;

pub const STANDARD_SEED: u64 = 77589;
pub const WINDOW_BITS: u32 = 20;

/// Generate every key of `total_bits` width with nonzero bits confined to a
/// 20-bit window starting at `offset` (mod `total_bits`).
pub fn generate(total_bits: usize, offset: usize) -> impl Iterator<Item = Blob> {
    (0u32..(1 << WINDOW_BITS)).map(move |window_value| {
            let mut blob = Blob::zero(total_bits);
            for bit in 0..WINDOW_BITS as usize {
                if (window_value >> bit) & 1 == 1 {
                    blob.set_bit((offset + bit) % total_bits, true);
                }
            }
            blob
    })
}

/// Number of distinct window offsets for a key of `total_bits` width.
pub fn offset_count(total_bits: usize) -> usize {
    total_bits
}
