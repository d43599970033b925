//! Keyset generators: one module per generator family, each yielding a
//! stream of byte-string keys to feed through the hash surface.

mod combinatorics;

pub mod cyclic;
pub mod differential;
pub mod permutation;
pub mod repeated_char;
pub mod sanity;
pub mod seed_keyset;
pub mod sparse;
pub mod text;
pub mod two_bytes;
pub mod windowed;
