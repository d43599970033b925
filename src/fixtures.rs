//! Illustrative [`HashFn`](crate::hash::HashFn) implementations used only by
//! this crate's own tests. None of these are a deliverable
//! surface — the concrete hash algorithms under test are always supplied by
//! an external caller.

use crate::blob::Blob;
use crate::hash::HashFn;

/// `hash(k, s) = (first 4 bytes of k, zero-padded) XOR s XOR len(k)`.
///
/// Folding the key length in (rather than a bare truncating XOR) is what
/// makes `AppendedZeroes` meaningful to test against this fixture: a pure
/// prefix-XOR would be blind to anything appended past the first four bytes.
/// Every output bit is a pure linear function of the corresponding seed bit,
/// so Avalanche fails with `max_bias ~= 0.5` (perfect correlation) and
/// DiffTest fails for any delta confined to bytes past the prefix.
#[derive(Debug, Clone, Copy)]
pub struct IdentityHash32;

impl HashFn for IdentityHash32 {
    fn hash(&self, key: &[u8], seed: &Blob) -> Blob {
        let prefix = Blob::from_bytes(32, key);
        let len = Blob::from_u64(32, key.len() as u64);
        prefix.xor(seed).xor(&len)
    }
}

/// A hash that ignores its input entirely, always returning the same 32-bit
/// constant. Used to exercise the failure path of every statistical test:
/// Sanity's reproducibility trivially holds, but seed-sensitivity and
/// appended-zero-sensitivity both fail, and Avalanche reports `max_bias ~=
/// 0.5` since no output bit ever flips.
#[derive(Debug, Clone, Copy)]
pub struct ConstantHash32(pub u32);

impl HashFn for ConstantHash32 {
    fn hash(&self, _key: &[u8], _seed: &Blob) -> Blob {
        Blob::from_u64(32, self.0 as u64)
    }
}

/// A hash that hashes only the leading `len - 1` bytes of the key, modeling
/// a hash that ignores the last byte of its input: Cyclic at `offset = 0`
/// passes since the period divides evenly into the ignored tail, while
/// `offset = 1` reports a massive collision excess.
#[derive(Debug, Clone, Copy)]
pub struct IgnoresLastByteHash64;

impl HashFn for IgnoresLastByteHash64 {
    fn hash(&self, key: &[u8], seed: &Blob) -> Blob {
        let truncated = if key.is_empty() { key } else { &key[..key.len() - 1] };
        Blob::from_u64(64, fxhash::hash64(truncated) ^ seed.to_u64())
    }
}

/// Adapter over the teacher's `fxhash` dev-dependency, exposing it through
/// the [`HashFn`] contract as a well-behaved 64-bit hash for exercising the
/// passing side of the suite.
#[derive(Debug, Clone, Copy)]
pub struct FxHashAdapter;

impl HashFn for FxHashAdapter {
    fn hash(&self, key: &[u8], seed: &Blob) -> Blob {
        let seeded = [seed.as_bytes(), key].concat();
        Blob::from_u64(64, fxhash::hash64(&seeded))
    }
}

/// Adapter over the teacher's `wyhash` dev-dependency.
#[derive(Debug, Clone, Copy)]
pub struct WyHashAdapter;

impl HashFn for WyHashAdapter {
    fn hash(&self, key: &[u8], seed: &Blob) -> Blob {
        Blob::from_u64(64, wyhash::wyhash(key, seed.to_u64()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_hash_changes_on_appended_byte() {
        let seed = Blob::zero(32);
        let short = IdentityHash32.hash(&[1, 2, 3, 4], &seed);
        let extended = IdentityHash32.hash(&[1, 2, 3, 4, 0], &seed);
        assert_ne!(short, extended);
    }

    #[test]
    fn constant_hash_ignores_everything() {
        let a = ConstantHash32(99).hash(&[1, 2, 3], &Blob::zero(32));
        let b = ConstantHash32(99).hash(&[9, 9, 9, 9, 9], &Blob::from_u64(32, 7));
        assert_eq!(a, b);
    }

    #[test]
    fn ignores_last_byte_hash_is_blind_to_the_final_byte() {
        let seed = Blob::zero(64);
        let a = IgnoresLastByteHash64.hash(&[1, 2, 3, 4], &seed);
        let b = IgnoresLastByteHash64.hash(&[1, 2, 3, 9], &seed);
        assert_eq!(a, b);
    }

    #[test]
    fn fxhash_and_wyhash_adapters_are_seed_sensitive() {
        let key = [1u8, 2, 3, 4, 5];
        let a = FxHashAdapter.hash(&key, &Blob::from_u64(64, 1));
        let b = FxHashAdapter.hash(&key, &Blob::from_u64(64, 2));
        assert_ne!(a, b);

        let a = WyHashAdapter.hash(&key, &Blob::from_u64(64, 1));
        let b = WyHashAdapter.hash(&key, &Blob::from_u64(64, 2));
        assert_ne!(a, b);
    }
}
