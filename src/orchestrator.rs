//! Test Orchestrator: binds a [`HashDescriptor`] to a
//! [`TestConfiguration`], runs every enabled sub-test, and AND-combines the
//! verdicts into one pass/fail result.
//!
//! The hash under test and the enabled sub-tests are always explicit
//! parameters here, never process-global state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::blob::Blob;
use crate::config::TestConfiguration;
use crate::error::SubTestOutcome;
use crate::hash::HashDescriptor;
use crate::keysets::{cyclic, differential, permutation, repeated_char, sanity, seed_keyset, sparse, text, two_bytes, windowed};
use crate::rng::DeterministicRng;
use crate::stats::{self, avalanche::FlipMatrix, bic::JointTally, birthday, collision};

/// Cooperative cancellation flag: checked between keyset batches (every
/// ~1,000,000 keys for the largest generators). Cheap to clone and share
/// across a parallel dispatch; a sub-test observing it mid-batch returns
/// [`SubTestOutcome::Indeterminate`] rather than finishing the batch.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How often (in keys) the largest generators check [`CancelToken`].
const CANCEL_CHECK_INTERVAL: usize = 1_000_000;

/// Outcome of one named sub-test, carrying enough of the measured statistic
/// to report alongside pass/fail.
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    pub name: &'static str,
    pub outcome: SubTestOutcome,
    pub measured: Option<f64>,
    pub expected: Option<f64>,
    pub threshold: Option<f64>,
}

impl TestResult {
    fn new(name: &'static str, outcome: SubTestOutcome) -> Self {
        Self { name, outcome, measured: None, expected: None, threshold: None }
    }

    fn with_stats(mut self, measured: f64, expected: f64, threshold: f64) -> Self {
        self.measured = Some(measured);
        self.expected = Some(expected);
        self.threshold = Some(threshold);
        self
    }
}

/// The full result of running a [`TestConfiguration`] against one descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteResult {
    /// Result of the mandatory Verification gate.
    pub verification_passed: bool,
    /// One [`TestResult`] per sub-test that actually ran.
    pub results: Vec<TestResult>,
}

impl SuiteResult {
    /// AND-combine every sub-test verdict with verification.
    /// `Indeterminate` and `SkippedOversize` do not themselves fail the
    /// overall result — only an explicit `Fail`, or a failed
    /// verification, does.
    pub fn passed(&self) -> bool {
        self.verification_passed && self.results.iter().all(|r| r.outcome.counts_as_pass())
    }
}

/// Binds one [`HashDescriptor`] to one [`TestConfiguration`] for the duration
/// of a run. Generators and statistical collectors are transient per
/// sub-test — this struct itself holds no sub-test state
/// between calls to [`TestSuite::run`].
pub struct TestSuite<'a> {
    descriptor: &'a HashDescriptor,
    config: &'a TestConfiguration,
    cancel: CancelToken,
}

impl<'a> TestSuite<'a> {
    pub fn new(descriptor: &'a HashDescriptor, config: &'a TestConfiguration) -> Self {
        Self { descriptor, config, cancel: CancelToken::new() }
    }

    /// Attach a cancellation token an external caller can trip mid-run.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run every sub-test [`TestConfiguration`] enables. Verification runs
    /// first and unconditionally; on failure the rest of the suite is
    /// skipped and [`SuiteResult::passed`] is `false`.
    ///
    /// Sub-tests are independent (each owns a fresh RNG and a transient
    /// collector) and are safe to run concurrently; with the `parallel`
    /// feature enabled they are dispatched across rayon's thread pool and
    /// the results reduced back into flag order, matching §5's "sub-tests
    /// MAY be dispatched in parallel across worker threads" — sequentially
    /// without it.
    #[tracing::instrument(skip(self), fields(hash = %self.descriptor.name))]
    pub fn run(&self) -> SuiteResult {
        let verification_passed = crate::verify::verify(self.descriptor);
        if !verification_passed {
            tracing::warn!(hash = %self.descriptor.name, "verification failed");
            return SuiteResult { verification_passed, results: Vec::new() };
        }

        let jobs = self.enabled_jobs();
        let results = dispatch(jobs);

        SuiteResult { verification_passed, results }
    }

    /// The closures for every sub-test this suite's [`TestConfiguration`]
    /// enables, in the order §4.5 lists the selection flags.
    #[allow(clippy::type_complexity)]
    fn enabled_jobs(&self) -> Vec<Box<dyn Fn() -> TestResult + Send + Sync + '_>> {
        let mut jobs: Vec<Box<dyn Fn() -> TestResult + Send + Sync + '_>> = Vec::new();
        if self.config.wants_sanity() {
            jobs.push(Box::new(|| self.run_sanity()));
        }
        if self.config.wants_diff() {
            jobs.push(Box::new(|| self.run_diff()));
        }
        if self.config.wants_diff_dist() {
            jobs.push(Box::new(|| self.run_diff_dist()));
        }
        if self.config.wants_avalanche() {
            jobs.push(Box::new(|| self.run_avalanche()));
        }
        if self.config.wants_bic() {
            jobs.push(Box::new(|| self.run_bic()));
        }
        if self.config.wants_cyclic() {
            jobs.push(Box::new(|| self.run_cyclic()));
        }
        if self.config.wants_two_bytes() {
            jobs.push(Box::new(|| self.run_two_bytes()));
        }
        if self.config.wants_sparse() {
            jobs.push(Box::new(|| self.run_sparse()));
        }
        if self.config.wants_permutation() {
            jobs.push(Box::new(|| self.run_permutation()));
        }
        if self.config.wants_window() {
            jobs.push(Box::new(|| self.run_window()));
        }
        if self.config.wants_text() {
            jobs.push(Box::new(|| self.run_text()));
        }
        if self.config.wants_zeroes() {
            jobs.push(Box::new(|| self.run_repeated_char("Zeroes", 0x00)));
        }
        if self.config.wants_effs() {
            jobs.push(Box::new(|| self.run_repeated_char("Effs", 0xFF)));
        }
        if self.config.wants_seed() {
            jobs.push(Box::new(|| self.run_seed()));
        }
        jobs
    }

    fn run_sanity(&self) -> TestResult {
        let result = sanity::run(self.descriptor, sanity::STANDARD_TRIAL_COUNT);
        let outcome = if result.passes() { SubTestOutcome::Pass } else { SubTestOutcome::Fail };
        TestResult::new("Sanity", outcome)
    }

    fn run_diff(&self) -> TestResult {
        let mut any_suspect = false;
        for &(key_bits, max_weight) in &differential::STANDARD_PARAMS {
            if !differential::run(self.descriptor, key_bits, max_weight).is_empty() {
                any_suspect = true;
                break;
            }
        }
        let outcome = if any_suspect { SubTestOutcome::Fail } else { SubTestOutcome::Pass };
        TestResult::new("Diff", outcome)
    }

    fn run_diff_dist(&self) -> TestResult {
        let mut rng = DeterministicRng::new(differential::STANDARD_SEED);
        let mut worst: Option<stats::BucketTestResult> = None;

        'outer: for &(key_bits, max_weight) in &differential::STANDARD_PARAMS {
            const DELTA_SAMPLE_CAP: usize = 64;
            let total_deltas = differential::delta_count(key_bits, max_weight);
            if total_deltas > DELTA_SAMPLE_CAP as u64 {
                tracing::debug!(
                    key_bits,
                    max_weight,
                    total_deltas,
                    sampled = DELTA_SAMPLE_CAP,
                    "DiffDist sampling only the first deltas of this (key_bits, max_weight); a PASS covers the sample, not the full delta set"
                );
            }
            for delta in differential::deltas(key_bits, max_weight).take(DELTA_SAMPLE_CAP) {
                if self.cancel.is_cancelled() {
                    return TestResult::new("DiffDist", SubTestOutcome::Indeterminate);
                }
                let seed = self.descriptor.zero_seed();
                let key_bytes = key_bits.div_ceil(8);
                let n = 10_000u64;
                let outputs_xor: Vec<Blob> = (0..n)
                    .map(|_| {
                        let key = Blob::from_rng(key_bits, &mut rng);
                        let flipped = key.xor(&delta);
                        let a = self.descriptor.compute(&key.as_bytes()[..key_bytes], &seed);
                        let b = self.descriptor.compute(&flipped.as_bytes()[..key_bytes], &seed);
                        a.xor(&b)
                    })
                    .collect();
                let result = stats::diffdist::analyze_delta(outputs_xor.iter(), n);
                if worst.map(|w| result.p_value < w.p_value).unwrap_or(true) {
                    worst = Some(result);
                }
                if worst.is_some_and(|w| w.p_value < 1.0 - self.config.confidence) {
                    break 'outer;
                }
            }
        }

        match worst {
            None => TestResult::new("DiffDist", SubTestOutcome::Pass),
            Some(result) => {
                let outcome =
                if result.passes(self.config.confidence) { SubTestOutcome::Pass } else { SubTestOutcome::Fail };
                TestResult::new("DiffDist", outcome).with_stats(
                    result.p_value,
                    1.0 - self.config.confidence,
                    1.0 - self.config.confidence,
                )
            }
        }
    }

    /// The key lengths (in bytes) the Avalanche and BIC ladders run, `{0, 8,
    /// 16,..., 152}`, run unconditionally — no data-dependent skip.
    fn avalanche_key_lengths() -> impl Iterator<Item = usize> {
        (0..=152).step_by(8)
    }

    fn run_avalanche(&self) -> TestResult {
        let reps = (32_000_000 / self.descriptor.hash_bits).max(1);
        let mut worst: Option<stats::AvalancheResult> = None;

        for key_bytes in Self::avalanche_key_lengths() {
            if self.cancel.is_cancelled() {
                return TestResult::new("Avalanche", SubTestOutcome::Indeterminate);
            }
            let mut rng = DeterministicRng::new(avalanche_seed(key_bytes));
            let result = self.avalanche_pass(key_bytes, reps, &mut rng);
            if worst.map(|w| result.max_bias > w.max_bias).unwrap_or(true) {
                worst = Some(result);
            }
        }

        match worst {
            None => TestResult::new("Avalanche", SubTestOutcome::Pass),
            Some(result) => {
                let outcome = if result.passes() { SubTestOutcome::Pass } else { SubTestOutcome::Fail };
                TestResult::new("Avalanche", outcome).with_stats(result.max_bias, 0.0, 0.01)
            }
        }
    }

    fn avalanche_pass(&self, key_bytes: usize, reps: usize, rng: &mut DeterministicRng) -> stats::AvalancheResult {
        let input_bits = self.descriptor.seed_bits + key_bytes * 8;
        let mut matrix = FlipMatrix::new(input_bits, self.descriptor.hash_bits);

        for i in 0..reps {
            if i % CANCEL_CHECK_INTERVAL == 0 && self.cancel.is_cancelled() {
                break;
            }
            let seed = Blob::from_rng(self.descriptor.seed_bits, rng);
            let mut key = vec![0u8; key_bytes];
            rng.fill_bytes(&mut key);
            let base = self.descriptor.compute(&key, &seed);
            matrix.add_rep();

            for bit in 0..input_bits {
                let (flipped_seed, flipped_key) = if bit < self.descriptor.seed_bits {
                    (seed.flipped_bit(bit), key.clone())
                } else {
                    let key_bit = bit - self.descriptor.seed_bits;
                    let mut k = key.clone();
                    k[key_bit / 8] ^= 1 << (key_bit % 8);
                    (seed.clone(), k)
                };
                let variant = self.descriptor.compute(&flipped_key, &flipped_seed);
                matrix.record(bit, |j| base.get_bit(j), |j| variant.get_bit(j));
            }
        }

        stats::avalanche::analyze(&matrix)
    }

    fn run_bic(&self) -> TestResult {
        let reps = (32_000_000 / self.descriptor.hash_bits).max(1);
        let mut worst: Option<stats::BicResult> = None;

        for key_bytes in Self::avalanche_key_lengths() {
            if self.cancel.is_cancelled() {
                return TestResult::new("BIC", SubTestOutcome::Indeterminate);
            }
            let mut rng = DeterministicRng::new(bic_seed(key_bytes));
            let result = self.bic_pass(key_bytes, reps, &mut rng);
            if worst.map(|w| result.max_bias > w.max_bias).unwrap_or(true) {
                worst = Some(result);
            }
        }

        match worst {
            None => TestResult::new("BIC", SubTestOutcome::Pass),
            Some(result) => {
                let outcome = if result.passes() { SubTestOutcome::Pass } else { SubTestOutcome::Fail };
                TestResult::new("BIC", outcome).with_stats(result.max_bias, 0.0, result.threshold)
            }
        }
    }

    fn bic_pass(&self, key_bytes: usize, reps: usize, rng: &mut DeterministicRng) -> stats::BicResult {
        // One joint tally per input bit, mirroring Avalanche's `FlipMatrix`
        // (`avalanche_pass`, above): §4.4.4 requires the output-pair bias be
        // tracked "for every input bit i", so a single rep must update every
        // input bit's tally, not sample one bit at random and fold every
        // rep into a single shared tally.
        let input_bits = self.descriptor.seed_bits + key_bytes * 8;
        let mut tallies: Vec<JointTally> =
            (0..input_bits).map(|_| JointTally::new(self.descriptor.hash_bits)).collect();

        for i in 0..reps {
            if i % CANCEL_CHECK_INTERVAL == 0 && self.cancel.is_cancelled() {
                break;
            }
            let seed = Blob::from_rng(self.descriptor.seed_bits, rng);
            let mut key = vec![0u8; key_bytes];
            rng.fill_bytes(&mut key);
            let base = self.descriptor.compute(&key, &seed);

            for bit in 0..input_bits {
                let (flipped_seed, flipped_key) = if bit < self.descriptor.seed_bits {
                    (seed.flipped_bit(bit), key.clone())
                } else {
                    let key_bit = bit - self.descriptor.seed_bits;
                    let mut k = key.clone();
                    k[key_bit / 8] ^= 1 << (key_bit % 8);
                    (seed.clone(), k)
                };
                let variant = self.descriptor.compute(&flipped_key, &flipped_seed);

                let tally = &mut tallies[bit];
                tally.add_rep();
                tally.record(|j| base.get_bit(j) != variant.get_bit(j));
            }
        }

        // Report the input bit with the worst output-pair bias, the same
        // "worst across the ladder" reduction Avalanche and the collision
        // sub-tests use.
        tallies
            .iter()
            .map(stats::bic::analyze)
            .reduce(|worst, result| if result.max_bias > worst.max_bias { result } else { worst })
            .unwrap_or(stats::BicResult { max_bias: 0.0, threshold: 1.0 })
    }

    fn run_cyclic(&self) -> TestResult {
        let mut rng = DeterministicRng::new(cyclic::STANDARD_SEED);
        let seed = self.descriptor.zero_seed();
        let state = self.descriptor.prepare(&seed);

        let mut worst: Option<collision::CollisionResult> = None;
        for key_len in cyclic::standard_key_lengths(self.descriptor.hash_bits / 8) {
            if self.cancel.is_cancelled() {
                return TestResult::new("Cyclic", SubTestOutcome::Indeterminate);
            }
            let keys = cyclic::generate(key_len, cyclic::PERIOD, cyclic::STANDARD_KEY_COUNT, &mut rng);
            let outputs: Vec<Blob> = keys.iter().map(|k| self.descriptor.compute_with(k, state.as_ref())).collect();
            if let Some(result) =
            collision::count_collisions(outputs.into_iter(), self.descriptor.hash_bits, self.config.resource_budget_bytes)
            {
                worst = Some(worst_of(worst, result));
            }
        }

        self.collision_verdict("Cyclic", worst)
    }

    fn run_two_bytes(&self) -> TestResult {
        let seed = self.descriptor.zero_seed();
        let state = self.descriptor.prepare(&seed);
        let mut worst: Option<collision::CollisionResult> = None;

        for len in two_bytes::LENGTHS {
            let n = two_bytes::key_count(len);
            let outputs = two_bytes::generate(len).map(|k| self.descriptor.compute_with(&k, state.as_ref()));
            let result = collision::count_collisions_with_len(
                outputs,
                n,
                self.descriptor.hash_bits,
                self.config.resource_budget_bytes,
            );
            worst = merge_worst(worst, result);
        }

        self.collision_verdict("TwoBytes", worst)
    }

    fn run_sparse(&self) -> TestResult {
        let seed = self.descriptor.zero_seed();
        let state = self.descriptor.prepare(&seed);
        let mut worst: Option<collision::CollisionResult> = None;

        for &(bits, k) in &sparse::SPARSE_PARAMS {
            let n = sparse::key_count(bits, k);
            let outputs = sparse::generate(bits, k)
            .map(|key| self.descriptor.compute_with(&key.as_bytes()[..bits.div_ceil(8)], state.as_ref()));
            let result = collision::count_collisions_with_len(
                outputs,
                n,
                self.descriptor.hash_bits,
                self.config.resource_budget_bytes,
            );
            worst = merge_worst(worst, result);
        }

        self.collision_verdict("Sparse", worst)
    }

    fn run_permutation(&self) -> TestResult {
        let seed = self.descriptor.zero_seed();
        let state = self.descriptor.prepare(&seed);
        let mut worst: Option<collision::CollisionResult> = None;

        for variant in &permutation::VARIANTS {
            let n = permutation::key_count(variant);
            let outputs = permutation::generate(variant).map(|k| self.descriptor.compute_with(&k, state.as_ref()));
            let result = collision::count_collisions_with_len(
                outputs,
                n,
                self.descriptor.hash_bits,
                self.config.resource_budget_bytes,
            );
            worst = merge_worst(worst, result);
        }

        self.collision_verdict("Permutation", worst)
    }

    fn run_window(&self) -> TestResult {
        let seed = self.descriptor.zero_seed();
        let state = self.descriptor.prepare(&seed);
        let total_bits = 2 * self.descriptor.hash_bits;
        let key_bytes = total_bits.div_ceil(8);
        let mut worst: Option<collision::CollisionResult> = None;

        for offset in 0..windowed::offset_count(total_bits) {
            if self.cancel.is_cancelled() {
                return TestResult::new("Window", SubTestOutcome::Indeterminate);
            }
            let n = 1u64 << windowed::WINDOW_BITS;
            let outputs = windowed::generate(total_bits, offset)
            .map(|key| self.descriptor.compute_with(&key.as_bytes()[..key_bytes], state.as_ref()));
            let result = collision::count_collisions_with_len(
                outputs,
                n,
                self.descriptor.hash_bits,
                self.config.resource_budget_bytes,
            );
            worst = merge_worst(worst, result);
        }

        self.collision_verdict("Window", worst)
    }

    fn run_text(&self) -> TestResult {
        let seed = self.descriptor.zero_seed();
        let state = self.descriptor.prepare(&seed);
        let n = text::key_count(text::ALPHANUMERIC.len(), text::K);
        let mut worst: Option<collision::CollisionResult> = None;

        for variant in &text::VARIANTS {
            let outputs = text::generate(variant, text::ALPHANUMERIC, text::K)
            .map(|k| self.descriptor.compute_with(&k, state.as_ref()));
            let result = collision::count_collisions_with_len(
                outputs,
                n,
                self.descriptor.hash_bits,
                self.config.resource_budget_bytes,
            );
            worst = merge_worst(worst, result);
        }

        self.collision_verdict("Text", worst)
    }

    fn run_repeated_char(&self, name: &'static str, byte: u8) -> TestResult {
        let seed = self.descriptor.zero_seed();
        let state = self.descriptor.prepare(&seed);
        let n = repeated_char::key_count() as u64;
        let outputs = repeated_char::generate(byte).map(|k| self.descriptor.compute_with(&k, state.as_ref()));
        let result =
        collision::count_collisions_with_len(outputs, n, self.descriptor.hash_bits, self.config.resource_budget_bytes);
        self.collision_verdict(name, result)
    }

    fn run_seed(&self) -> TestResult {
        let seeds = seed_keyset::generate(self.descriptor.seed_bits, seed_keyset::STANDARD_SEED_COUNT);
        let outputs: Vec<Blob> =
        seeds.iter().map(|s| self.descriptor.compute(seed_keyset::FIXED_KEY, s)).collect();
        let result = collision::count_collisions(
            outputs.into_iter(),
            self.descriptor.hash_bits,
            self.config.resource_budget_bytes,
        );
        self.collision_verdict("Seed", result)
    }

    fn collision_verdict(&self, name: &'static str, result: Option<collision::CollisionResult>) -> TestResult {
        match result {
            None => TestResult::new(name, SubTestOutcome::SkippedOversize),
            Some(result) => {
                let threshold = birthday::threshold_multiple_for_confidence(self.config.confidence);
                let outcome = if result.exceeds(threshold) { SubTestOutcome::Fail } else { SubTestOutcome::Pass };
                TestResult::new(name, outcome).with_stats(result.observed as f64, result.expected, threshold)
            }
        }
    }
}

/// Run every job closure, in parallel across rayon's thread pool when the
/// `parallel` feature is enabled and sequentially otherwise, preserving flag
/// order in the returned `Vec` either way.
#[cfg(feature = "parallel")]
fn dispatch(jobs: Vec<Box<dyn Fn() -> TestResult + Send + Sync + '_>>) -> Vec<TestResult> {
    use rayon::prelude::*;
    jobs.into_par_iter().map(|job| job()).collect()
}

#[cfg(not(feature = "parallel"))]
fn dispatch(jobs: Vec<Box<dyn Fn() -> TestResult + Send + Sync + '_>>) -> Vec<TestResult> {
    jobs.into_iter().map(|job| job()).collect()
}

fn merge_worst(
    current: Option<collision::CollisionResult>,
    next: Option<collision::CollisionResult>,
) -> Option<collision::CollisionResult> {
    match (current, next) {
        (None, next) => next,
        (current, None) => current,
        (Some(a), Some(b)) => Some(worst_of(Some(a), b)),
    }
}

/// The "worse" of two collision results is the one with the larger ratio of
/// observed to expected collisions — i.e. the one further from the uniform
/// model, regardless of which sub-pass it came from.
fn worst_of(current: Option<collision::CollisionResult>, next: collision::CollisionResult) -> collision::CollisionResult {
    match current {
        None => next,
        Some(current) => {
            let current_ratio = current.observed as f64 / current.expected.max(1e-9);
            let next_ratio = next.observed as f64 / next.expected.max(1e-9);
            if next_ratio > current_ratio {
                next
            } else {
                current
            }
        }
    }
}

fn avalanche_seed(key_bytes: usize) -> u64 {
    // Distinct per key length so each ladder rung draws an independent
    // stream, while staying reproducible run to run.
    0x6176_616C_0000_0000 ^ key_bytes as u64
}

fn bic_seed(key_bytes: usize) -> u64 {
    0x6269_635F_0000_0000 ^ key_bytes as u64
}

/// Run Verification (and, if `validate`, Sanity too) over every registered
/// descriptor, returning whether all of them passed.
pub fn self_test(descriptors: &[HashDescriptor], validate: bool) -> bool {
    descriptors.iter().all(|descriptor| {
        let ok = crate::verify::verify(descriptor);
        if !ok {
            tracing::error!(hash = %descriptor.name, "self-test verification failed");
            return false;
        }
        if validate {
            let result = sanity::run(descriptor, sanity::STANDARD_TRIAL_COUNT);
            if !result.passes() {
                tracing::error!(hash = %descriptor.name, "self-test sanity failed");
                return false;
            }
        }
        true
    })
}

/// Find `name` in `descriptors` and run `config` against it, returning the
/// overall pass/fail. Returns `false` if no descriptor with that name is
/// registered.
pub fn test_by_name(name: &str, descriptors: &[HashDescriptor], config: &TestConfiguration) -> bool {
    match descriptors.iter().find(|d| d.name == name) {
        Some(descriptor) => test_by_descriptor(descriptor, config),
        None => false,
    }
}

/// Run `config` against `descriptor` directly.
pub fn test_by_descriptor(descriptor: &HashDescriptor, config: &TestConfiguration) -> bool {
    TestSuite::new(descriptor, config).run().passed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ConstantHash32, IdentityHash32};
    use std::sync::Arc;

    fn identity_descriptor() -> HashDescriptor {
        let probe = HashDescriptor::new("id", "", 32, 32, 0, Arc::new(IdentityHash32)).unwrap();
        let constant = crate::verify::compute_verification_constant(&probe);
        HashDescriptor::new("id", "", 32, 32, constant, Arc::new(IdentityHash32)).unwrap()
    }

    #[test]
    fn suite_fails_closed_on_verification_mismatch() {
        let desc = HashDescriptor::new("id", "", 32, 32, 0xDEAD_BEEF, Arc::new(IdentityHash32)).unwrap();
        let config = TestConfiguration::quick();
        let result = TestSuite::new(&desc, &config).run();
        assert!(!result.verification_passed);
        assert!(result.results.is_empty(), "no sub-tests should run after a failed verification");
        assert!(!result.passed());
    }

    #[test]
    fn sanity_only_suite_passes_for_identity_hash() {
        let desc = identity_descriptor();
        let config = TestConfiguration { sanity: true, ..TestConfiguration::none() };
        let result = TestSuite::new(&desc, &config).run();
        assert!(result.verification_passed);
        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].name, "Sanity");
        assert!(result.passed());
    }

    #[test]
    fn avalanche_only_suite_fails_for_constant_hash() {
        let probe = HashDescriptor::new("const", "", 32, 32, 0, Arc::new(ConstantHash32(5))).unwrap();
        let constant = crate::verify::compute_verification_constant(&probe);
        let desc = HashDescriptor::new("const", "", 32, 32, constant, Arc::new(ConstantHash32(5))).unwrap();

        let config = TestConfiguration { avalanche: true, ..TestConfiguration::none() };
        let result = TestSuite::new(&desc, &config).run();
        assert!(result.verification_passed);
        assert!(!result.passed());
        assert_eq!(result.results[0].outcome, SubTestOutcome::Fail);
    }

    #[test]
    fn self_test_rejects_a_mismatched_registry_entry() {
        let good = identity_descriptor();
        let bad = HashDescriptor::new("bad", "", 32, 32, 0x1234, Arc::new(IdentityHash32)).unwrap();
        assert!(self_test(&[good], false));
        assert!(!self_test(std::slice::from_ref(&bad), false));
    }

    #[test]
    fn cancel_token_is_observed_before_completion() {
        let desc = identity_descriptor();
        let config = TestConfiguration { avalanche: true, ..TestConfiguration::none() };
        let cancel = CancelToken::new();
        cancel.cancel();
        let suite = TestSuite::new(&desc, &config).with_cancel_token(cancel);
        let result = suite.run();
        assert_eq!(result.results[0].outcome, SubTestOutcome::Indeterminate);
    }

    #[test]
    fn multi_subtest_results_preserve_flag_order_regardless_of_dispatch() {
        // Sanity runs before Diff before Avalanche in §4.5's flag order; this
        // must hold whether `dispatch` ran the jobs sequentially or (under the
        // `parallel` feature) across rayon's pool, since the orchestrator
        // always reduces back into that order.
        let desc = identity_descriptor();
        let config = TestConfiguration {
            sanity: true,
            diff: true,
            avalanche: true,
            ..TestConfiguration::none()
        };
        let result = TestSuite::new(&desc, &config).run();
        let names: Vec<&str> = result.results.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Sanity", "Diff", "Avalanche"]);
    }

    #[test]
    fn test_by_name_reports_false_for_unknown_hash() {
        let desc = identity_descriptor();
        assert!(!test_by_name("nonexistent", &[desc], &TestConfiguration::quick()));
    }
}
