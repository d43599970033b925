#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(docsrs, feature(doc_cfg_hide))]
#![cfg_attr(docsrs, doc(cfg_hide(docsrs)))]
#![deny(unused_must_use)]

//! A statistical test harness for evaluating the quality of non-cryptographic
//! hash functions, SMHasher-style.
//!
//! This crate is the engine, not a hash zoo: it never implements a hash
//! function itself (outside a couple of illustrative fixtures gated behind
//! `#[cfg(test)]`). Callers plug in their own hash by implementing
//! [`hash::HashFn`] and describing it with a [`hash::HashDescriptor`], then
//! hand that descriptor to [`orchestrator::TestSuite`].
//!
//! ```
//! use hashcheck::blob::Blob;
//! use hashcheck::config::TestConfiguration;
//! use hashcheck::hash::{HashDescriptor, HashFn};
//! use hashcheck::orchestrator::TestSuite;
//! use std::sync::Arc;
//!
//! struct XorFold32;
//! impl HashFn for XorFold32 {
//! fn hash(&self, key: &[u8], seed: &Blob) -> Blob {
//! Blob::from_bytes(32, key).xor(seed)
//! }
//! }
//!
//! let probe = HashDescriptor::new("xor-fold", "toy example", 32, 32, 0, Arc::new(XorFold32))
//!.expect("32/32 is a supported width pair");
//! let constant = hashcheck::verify::compute_verification_constant(&probe);
//! let descriptor =
//! HashDescriptor::new("xor-fold", "toy example", 32, 32, constant, Arc::new(XorFold32)).unwrap();
//!
//! let config = TestConfiguration { sanity: true, ..TestConfiguration::none() };
//! let result = TestSuite::new(&descriptor, &config).run();
//! assert!(result.verification_passed);
//! ```

/// Bit-addressable fixed-width value abstraction used for keys, seeds,
/// and hash outputs.
pub mod blob;
/// Which sub-tests run, at what confidence level, and under what resource
/// budget.
pub mod config;
/// The error taxonomy and per-sub-test verdict enum.
pub mod error;
/// The hash surface: a uniform entry point to hash functions of differing
/// output and seed widths.
pub mod hash;
/// Keyset generators, one module per generator family.
pub mod keysets;
/// Binds a hash descriptor to a configuration and runs the suite.
pub mod orchestrator;
/// Deterministic, reproducible PRNG used by every keyset generator.
pub mod rng;
/// Statistical analyzers: collision counting, bucket distribution, avalanche
/// bias, BIC, differential distribution, birthday-bound expectations.
pub mod stats;
/// Verification constant computation.
pub mod verify;

/// Illustrative [`hash::HashFn`] fixtures used only by this crate's own test
/// suite. Not a deliverable surface.
#[cfg(test)]
pub mod fixtures;
