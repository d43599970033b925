//! χ²-style bucket distribution test.
//!
//! Partitions hash outputs into `B = 2^b` buckets by their top `b` bits, `b`
//! chosen as the largest integer with `B <= N/5` so each bucket is expected to
//! hold at least 5 keys. The bucket counts are compared to uniform via a χ²
//! score, converted to a p-value with the Wilson–Hilferty asymptotic
//! approximation (exact for the degrees of freedom this crate ever sees, which
//! are large enough that the approximation error is negligible).

use crate::blob::Blob;

/// Result of a bucket distribution test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketTestResult {
    pub chi_square: f64,
    pub degrees_of_freedom: u32,
    pub p_value: f64,
    pub bucket_count: u64,
}

impl BucketTestResult {
    /// Passes when the p-value is at least `1 - confidence`: a tail
    /// event this extreme should occur no more than `1 - confidence` of the
    /// time under the null hypothesis of uniformity.
    pub fn passes(&self, confidence: f64) -> bool {
        self.p_value >= 1.0 - confidence
    }
}

/// Choose the largest bucket-count exponent `b` such that `2^b <= n / 5`.
///
/// Returns `0` (a single bucket) if `n < 5`, since no split can guarantee an
/// expected occupancy of 5 at any finer granularity.
pub fn choose_bucket_bits(n: u64) -> u32 {
    if n < 5 {
        return 0;
    }
    let max_buckets = n / 5;
    // largest b with 2^b <= max_buckets
    (63 - max_buckets.leading_zeros()).min(32)
}

/// Run the bucket test over a stream of hash outputs, bucketing by their top
/// `bucket_bits` bits.
pub fn bucket_test<'a>(outputs: impl Iterator<Item = &'a Blob>, bucket_bits: u32) -> BucketTestResult {
    let bucket_count = 1u64 << bucket_bits;
    let mut counts = vec![0u64; bucket_count as usize];
    let mut n = 0u64;
    for output in outputs {
        let idx = output.top_bits(bucket_bits) as usize;
        counts[idx] += 1;
        n += 1;
    }
    chi_square_from_counts(&counts, n)
}

/// Compute the χ² score and p-value from pre-tallied bucket counts.
pub fn chi_square_from_counts(counts: &[u64], n: u64) -> BucketTestResult {
    let bucket_count = counts.len() as u64;
    let expected = n as f64 / bucket_count as f64;
    let chi_square: f64 = counts
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum();

    let df = (bucket_count.saturating_sub(1)) as u32;
    let p_value = chi_square_upper_tail_p_value(chi_square, df.max(1));

    BucketTestResult { chi_square, degrees_of_freedom: df, p_value, bucket_count }
}

/// `P(X > x)` for `X ~ ChiSquare(df)`, via the Wilson–Hilferty cube-root
/// normal approximation:
///
/// `((X/df)^(1/3) - (1 - 2/(9df))) / sqrt(2/(9df))` is approximately standard
/// normal, so the upper-tail p-value is `1 - Phi(z)`.
pub fn chi_square_upper_tail_p_value(x: f64, df: u32) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    let df = df as f64;
    let term = 2.0 / (9.0 * df);
    let z = ((x / df).powf(1.0 / 3.0) - (1.0 - term)) / term.sqrt();
    1.0 - standard_normal_cdf(z)
}

/// Standard normal CDF via the Abramowitz & Stegun 7.1.26 error-function
/// approximation (max absolute error ~1.5e-7), avoiding a dependency on a
/// statistics crate for a single closed-form function.
fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

fn erf(x: f64) -> f64 {
    // Abramowitz & Stegun formula 7.1.26.
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();
    sign * y
}
