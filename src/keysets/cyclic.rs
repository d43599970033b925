//! Keyset 'Cyclic': keys of the form `P·repeat(n)` — a short random
//! prefix followed by a cycling sequence of `period` distinct byte values,
//! filled out to `key_len` bytes total. Ten million keys are drawn per
//! `(key_len, period)` combination in the standard suite, with `key_len`
//! ranging over `hash_bytes + 0..= hash_bytes + 4` and `period = 8`.
//!
//! RNG seed for this keyset family is the literal `910203`.

use crate::rng::DeterministicRng;

pub const STANDARD_SEED: u64 = 910203;
pub const PERIOD: usize = 8;
pub const STANDARD_KEY_COUNT: usize = 10_000_000;

/// The five key lengths run for a hash of `hash_bytes` output width:
/// `hash_bytes + {0, 1, 2, 3, 4}`.
pub fn standard_key_lengths(hash_bytes: usize) -> [usize; 5] {
    [hash_bytes, hash_bytes + 1, hash_bytes + 2, hash_bytes + 3, hash_bytes + 4]
}

/// Generate `count` cyclic keys of length `key_len`, each built from a cycle
/// of `period` random bytes repeated (and rotated by a random phase) to fill
/// the key.
pub fn generate(
    key_len: usize,
    period: usize,
    count: usize,
    rng: &mut DeterministicRng,
) -> Vec<Vec<u8>> {
    let mut keys = Vec::with_capacity(count);
    for _ in 0..count {
        let cycle: Vec<u8> = (0..period).map(|_| rng.gen_byte()).collect();
        let phase = rng.gen_below(period);
        let key: Vec<u8> = (0..key_len).map(|i| cycle[(i + phase) % period]).collect();
        keys.push(key);
    }
    keys
}
