//! The hash surface: a uniform entry point to hash functions of varying
//! output width (32/64/128/256 bits) and seed width (32…256 bits).
//!
//! The concrete algorithms plugged in here (MurmurHash, SipHash, rapidhash,...)
//! are explicitly out of scope — this module only defines the contract they
//! must satisfy and the static record ([`HashDescriptor`]) that describes one.

use crate::blob::Blob;
use crate::error::HashCheckError;

/// Bit widths a hash output is allowed to take.
pub const SUPPORTED_HASH_BITS: [usize; 4] = [32, 64, 128, 256];

/// Bit widths a seed is allowed to take. Widths not a multiple of 8 (95,
/// 127, 191) are padded to the next byte boundary by [`Blob`]; the underlying
/// hash implementation receives only the declared number of bits, the remainder
/// held at zero.
pub const SUPPORTED_SEED_BITS: [usize; 9] = [32, 64, 95, 96, 112, 127, 128, 191, 256];

/// The pluggable hash contract.
///
/// Implementors provide the actual hash algorithm; this crate never implements
/// one itself outside test fixtures. An implementor's `hash_bits`/`seed_bits`
/// are fixed for its lifetime and are exposed via [`HashDescriptor`], not via
/// this trait, so that the same trait object can be stored in a hash registry
/// regardless of width.
pub trait HashFn: Send + Sync {
    /// Compute the hash of `key` under `seed`. `seed.bits()` always equals the
    /// descriptor's `seed_bits`; `hash.bits()` of the result always equals
    /// `hash_bits`.
    fn hash(&self, key: &[u8], seed: &Blob) -> Blob;

    /// Prepare state from `seed` for repeated hashing under the same seed.
    /// The default implementation does no precomputation and simply
    /// remembers the seed; implementations with an expensive seed schedule
    /// should override both this and [`HashFn::hash_with`].
    fn prepare(&self, seed: &Blob) -> Box<dyn PreparedState> {
        Box::new(UnpreparedState(seed.clone()))
    }

    /// Compute the hash of `key` using previously prepared state. Must agree
    /// bit-exactly with `hash(key, seed)` for the seed that produced `state`.
    fn hash_with(&self, key: &[u8], state: &dyn PreparedState) -> Blob {
        self.hash(key, state.seed())
    }
}

/// Opaque state produced by [`HashFn::prepare`], scoped to one sub-test.
pub trait PreparedState: Send + Sync {
    /// The seed this state was prepared from, needed by the default
    /// [`HashFn::hash_with`] implementation.
    fn seed(&self) -> &Blob;
}

/// The trivial [`PreparedState`] used when a [`HashFn`] has no expensive seed
/// schedule to amortize.
struct UnpreparedState(Blob);

impl PreparedState for UnpreparedState {
    fn seed(&self) -> &Blob {
        &self.0
    }
}

/// An immutable record describing one hash under test.
///
/// A descriptor's `(name, hash_bits, seed_bits, verification_constant)` tuple
/// uniquely identifies a hash binding; two descriptors sharing a name but
/// disagreeing on any of the rest indicate a registration bug (surfaced as
/// [`HashCheckError::ConflictingDescriptor`]).
pub struct HashDescriptor {
    pub name: String,
    pub description: String,
    pub hash_bits: usize,
    pub seed_bits: usize,
    /// Expected output of the canonical verification keyset, as a
    /// little-endian `u32`.
    pub verification_constant: u32,
    pub hash_fn: std::sync::Arc<dyn HashFn>,
}

impl HashDescriptor {
    /// Construct a descriptor, validating that `hash_bits`/`seed_bits` are ones
    /// the hash surface knows how to dispatch.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        hash_bits: usize,
        seed_bits: usize,
        verification_constant: u32,
        hash_fn: std::sync::Arc<dyn HashFn>,
    ) -> Result<Self, HashCheckError> {
        let name = name.into();
        if !SUPPORTED_HASH_BITS.contains(&hash_bits) || !SUPPORTED_SEED_BITS.contains(&seed_bits) {
            return Err(HashCheckError::UnsupportedWidths { name, hash_bits, seed_bits });
        }
        Ok(Self {
            name,
            description: description.into(),
            hash_bits,
            seed_bits,
            verification_constant,
            hash_fn,
        })
    }

    /// Build a zero seed of this descriptor's seed width.
    pub fn zero_seed(&self) -> Blob {
        Blob::zero(self.seed_bits)
    }

    /// Build a seed of this descriptor's width from a plain integer.
    pub fn seed_from_u64(&self, value: u64) -> Blob {
        Blob::from_u64(self.seed_bits, value)
    }

    #[inline]
    pub fn compute(&self, key: &[u8], seed: &Blob) -> Blob {
        debug_assert_eq!(seed.bits(), self.seed_bits);
        let out = self.hash_fn.hash(key, seed);
        debug_assert_eq!(out.bits(), self.hash_bits);
        out
    }

    #[inline]
    pub fn prepare(&self, seed: &Blob) -> Box<dyn PreparedState> {
        debug_assert_eq!(seed.bits(), self.seed_bits);
        self.hash_fn.prepare(seed)
    }

    #[inline]
    pub fn compute_with(&self, key: &[u8], state: &dyn PreparedState) -> Blob {
        self.hash_fn.hash_with(key, state)
    }
}
