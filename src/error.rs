//! Error taxonomy and the per-sub-test verdict enum.
//!
//! Only configuration-time failures unwind as `Err`; statistical
//! failures, cancellation, and oversize skips are recorded values, not errors —
//! they never halt a descriptor's remaining sub-tests.

/// A configuration-time failure. Fatal: the caller should not attempt to run the
/// suite against the offending descriptor.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HashCheckError {
    /// The descriptor names a `(hash_bits, seed_bits)` pair the hash surface does
    /// not know how to dispatch.
    #[error("unsupported (hash_bits={hash_bits}, seed_bits={seed_bits}) for hash '{name}'")]
    UnsupportedWidths { name: String, hash_bits: usize, seed_bits: usize },

    /// A sub-test's estimated memory footprint exceeds the configured resource
    /// budget and the orchestrator has no radix-partitioned fallback available
    /// for the requested strategy.
    #[error(
            "sub-test '{subtest}' estimated {estimated_bytes} bytes, budget is {budget_bytes} bytes"
    )]
    ResourceBudgetExceeded { subtest: String, estimated_bytes: u64, budget_bytes: u64 },

    /// Two descriptors were registered with the same name but different bit
    /// widths or verification constants.
    #[error("duplicate hash name '{0}' registered with conflicting descriptors")]
    ConflictingDescriptor(String),
}

/// The outcome of a single sub-test, distinct from a `Result`: every sub-test
/// always produces one of these, never an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubTestOutcome {
    /// The measured statistic satisfied the configured threshold.
    Pass,
    /// The measured statistic exceeded the configured threshold.
    Fail,
    /// The sub-test was cancelled cooperatively before completion.
    Indeterminate,
    /// The sub-test's estimated memory footprint exceeded the resource budget and
    /// was skipped rather than attempted.
    SkippedOversize,
}

impl SubTestOutcome {
    /// Whether this outcome should be AND-combined as a pass when computing the
    /// descriptor's overall verdict. `Indeterminate` and `SkippedOversize`
    /// are reported distinctly and do not count as failures on their own.
    pub fn counts_as_pass(self) -> bool {
        !matches!(self, SubTestOutcome::Fail)
    }

    pub fn is_pass(self) -> bool {
        matches!(self, SubTestOutcome::Pass)
    }
}
