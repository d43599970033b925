//! Differential-distribution analyzer.
//!
//! For a fixed input-XOR delta, the output-XOR of an ideal hash over random
//! keys is uniform. This runs the bucket test against the
//! distribution of `hash(key) XOR hash(key XOR delta)` for many random keys.

use crate::blob::Blob;
use crate::stats::bucket::{self, BucketTestResult};

/// Run the bucket test over the output-XOR distribution for one delta.
///
/// `outputs_xor` must already be the XOR of `hash(key)` and
/// `hash(key XOR delta)` for each sampled key.
pub fn analyze_delta<'a>(outputs_xor: impl Iterator<Item = &'a Blob>, n: u64) -> BucketTestResult {
    let bits = bucket::choose_bucket_bits(n);
    bucket::bucket_test(outputs_xor, bits)
}
