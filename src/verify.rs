//! Verification constant computation — the first gate any descriptor must
//! pass before the rest of the suite runs.
//!
//! The canonical keyset is 255 keys: `[0], [0,1], [0,1,2],..., [0..254]` (key of
//! length `k+1` holds bytes `0..=k`), each hashed under seed `256 - k`
//! (interpreted in the hash's own seed width). The 255 outputs are XOR-folded
//! into a buffer of length `255 * (hash_bits / 8)`, which is itself hashed under
//! seed 0 to produce the final verification output. The first 4 bytes of that
//! output, read little-endian, are the verification constant.
//!
//! This XOR-folding procedure is a critical invariant: any reimplementation
//! must preserve it bit-exactly, including byte order, padding, and seed-width
//! assignment.

use crate::blob::Blob;
use crate::hash::HashDescriptor;

/// Number of keys in the canonical verification keyset.
const KEY_COUNT: usize = 255;

/// Compute the verification constant for `descriptor` by running the canonical
/// keyset through its hash function.
pub fn compute_verification_constant(descriptor: &HashDescriptor) -> u32 {
    let hash_bytes = descriptor.hash_bits / 8;
    let mut folded = vec![0u8; KEY_COUNT * hash_bytes];

    // key of length k+1 holds bytes [0, 1,..., k]; k ranges 0..=254.
    let mut key = Vec::with_capacity(KEY_COUNT);
    for k in 0..KEY_COUNT {
        key.push(k as u8);
        let seed_value = (256 - k) as u64;
        let seed = descriptor.seed_from_u64(seed_value);
        let output = descriptor.compute(&key, &seed);

        let start = k * hash_bytes;
        for (i, byte) in output.as_bytes().iter().enumerate().take(hash_bytes) {
            folded[start + i] ^= *byte;
        }
    }

    let zero_seed = descriptor.zero_seed();
    let final_hash = descriptor.compute(&folded, &zero_seed);
    final_hash.to_u32()
}

/// Run [`compute_verification_constant`] and compare it against the
/// descriptor's stored `verification_constant`.
pub fn verify(descriptor: &HashDescriptor) -> bool {
    compute_verification_constant(descriptor) == descriptor.verification_constant
}

/// Build the canonical verification keyset as standalone (key, seed) pairs, for
/// callers (such as the self-test bootstrap) that want to inspect the inputs
/// rather than only the folded output.
pub fn canonical_keyset(descriptor: &HashDescriptor) -> Vec<(Vec<u8>, Blob)> {
    let mut pairs = Vec::with_capacity(KEY_COUNT);
    let mut key = Vec::with_capacity(KEY_COUNT);
    for k in 0..KEY_COUNT {
        key.push(k as u8);
        let seed = descriptor.seed_from_u64((256 - k) as u64);
        pairs.push((key.clone(), seed));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::IdentityHash32;
    use std::sync::Arc;

    #[test]
    fn canonical_keyset_has_255_keys_of_increasing_length() {
        let desc =
        HashDescriptor::new("id", "", 32, 32, 0, Arc::new(IdentityHash32)).unwrap();
        let pairs = canonical_keyset(&desc);
        assert_eq!(pairs.len(), 255);
        for (i, (key, _seed)) in pairs.iter().enumerate() {
            assert_eq!(key.len(), i + 1);
            assert_eq!(key, &(0..=i as u8).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn verification_constant_is_deterministic() {
        let desc =
        HashDescriptor::new("id", "", 32, 32, 0, Arc::new(IdentityHash32)).unwrap();
        let a = compute_verification_constant(&desc);
        let b = compute_verification_constant(&desc);
        assert_eq!(a, b);
    }

    #[test]
    fn verify_detects_mismatched_constant() {
        let desc =
        HashDescriptor::new("id", "", 32, 32, 0xDEAD_BEEF, Arc::new(IdentityHash32))
        .unwrap();
        assert!(!verify(&desc), "0xDEADBEEF should not be identity-32's real constant");
    }

    #[test]
    fn verify_passes_with_pinned_constant() {
        let probe =
        HashDescriptor::new("id", "", 32, 32, 0, Arc::new(IdentityHash32)).unwrap();
        let pinned = compute_verification_constant(&probe);
        let desc =
        HashDescriptor::new("id", "", 32, 32, pinned, Arc::new(IdentityHash32)).unwrap();
        assert!(verify(&desc));
    }
}
