//! Which sub-tests run, at what confidence, and within what resource budget.
//!
//! The original source threads a long list of `extern bool g_test*` globals
//! through module-global state (RunTests.cpp). Here that is re-expressed as
//! a plain value passed explicitly to the orchestrator — the hash under
//! test is always a parameter, never process-wide.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default confidence level used throughout the suite, matching the
/// value RunTests.cpp threads through every distribution test.
pub const DEFAULT_CONFIDENCE: f64 = 0.99999;

/// Default resource budget: 4 GiB.
pub const DEFAULT_RESOURCE_BUDGET_BYTES: u64 = 4 * 1024 * 1024 * 1024;

/// Which sub-tests are enabled for a suite run, and at what confidence level.
///
/// Each sub-test runs iff its own flag is set OR `all` is set. `diff_dist` and
/// `bic` additionally require `really_all` — they are expensive and
/// rarely needed outside a "reallyAll" deep pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TestConfiguration {
    pub all: bool,
    pub really_all: bool,
    pub sanity: bool,
    pub diff: bool,
    pub diff_dist: bool,
    pub avalanche: bool,
    pub bic: bool,
    pub cyclic: bool,
    pub two_bytes: bool,
    pub sparse: bool,
    pub permutation: bool,
    pub window: bool,
    pub text: bool,
    pub zeroes: bool,
    pub effs: bool,
    pub seed: bool,
    /// One-sided significance level in `(0, 1)`, e.g. `0.99999`. Distribution
    /// tests pass when their p-value is at least `1 - confidence`.
    pub confidence: f64,
    /// Memory ceiling beyond which a sub-test returns `SkippedOversize`
    /// instead of attempting an in-memory collision count.
    pub resource_budget_bytes: u64,
}

impl TestConfiguration {
    /// Every sub-test enabled, including the expensive `really_all`-gated ones,
    /// at the default confidence level.
    pub fn all() -> Self {
        Self {
            all: true,
            really_all: true,
            sanity: true,
            diff: true,
            diff_dist: true,
            avalanche: true,
            bic: true,
            cyclic: true,
            two_bytes: true,
            sparse: true,
            permutation: true,
            window: true,
            text: true,
            zeroes: true,
            effs: true,
            seed: true,
            confidence: DEFAULT_CONFIDENCE,
            resource_budget_bytes: DEFAULT_RESOURCE_BUDGET_BYTES,
        }
    }

    /// A cheap suite suitable for CI or iterative development: sanity,
    /// avalanche, and the differential test only.
    pub fn quick() -> Self {
        Self {
            all: false,
            really_all: false,
            sanity: true,
            diff: true,
            diff_dist: false,
            avalanche: true,
            bic: false,
            cyclic: false,
            two_bytes: false,
            sparse: false,
            permutation: false,
            window: false,
            text: false,
            zeroes: false,
            effs: false,
            seed: false,
            confidence: DEFAULT_CONFIDENCE,
            resource_budget_bytes: DEFAULT_RESOURCE_BUDGET_BYTES,
        }
    }

    /// No sub-tests enabled; callers flip the ones they want on.
    pub fn none() -> Self {
        Self {
            all: false,
            really_all: false,
            sanity: false,
            diff: false,
            diff_dist: false,
            avalanche: false,
            bic: false,
            cyclic: false,
            two_bytes: false,
            sparse: false,
            permutation: false,
            window: false,
            text: false,
            zeroes: false,
            effs: false,
            seed: false,
            confidence: DEFAULT_CONFIDENCE,
            resource_budget_bytes: DEFAULT_RESOURCE_BUDGET_BYTES,
        }
    }

    pub fn wants_diff_dist(&self) -> bool {
        self.diff_dist || self.really_all
    }

    pub fn wants_bic(&self) -> bool {
        self.bic || self.really_all
    }

    fn wants(&self, flag: bool) -> bool {
        flag || self.all
    }

    pub fn wants_sanity(&self) -> bool {
        self.wants(self.sanity)
    }

    pub fn wants_diff(&self) -> bool {
        self.wants(self.diff)
    }

    pub fn wants_avalanche(&self) -> bool {
        self.wants(self.avalanche)
    }

    pub fn wants_cyclic(&self) -> bool {
        self.wants(self.cyclic)
    }

    pub fn wants_two_bytes(&self) -> bool {
        self.wants(self.two_bytes)
    }

    pub fn wants_sparse(&self) -> bool {
        self.wants(self.sparse)
    }

    pub fn wants_permutation(&self) -> bool {
        self.wants(self.permutation)
    }

    pub fn wants_window(&self) -> bool {
        self.wants(self.window)
    }

    pub fn wants_text(&self) -> bool {
        self.wants(self.text)
    }

    pub fn wants_zeroes(&self) -> bool {
        self.wants(self.zeroes)
    }

    pub fn wants_effs(&self) -> bool {
        self.wants(self.effs)
    }

    pub fn wants_seed(&self) -> bool {
        self.wants(self.seed)
    }
}

impl Default for TestConfiguration {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_flag_implies_every_basic_subtest() {
        let cfg = TestConfiguration::none();
        assert!(!cfg.wants_sanity());
        let cfg = TestConfiguration { all: true, ..TestConfiguration::none() };
        assert!(cfg.wants_sanity());
        assert!(cfg.wants_avalanche());
        assert!(cfg.wants_cyclic());
    }

    #[test]
    fn bic_and_diff_dist_need_really_all_even_with_all_set() {
        let cfg = TestConfiguration { all: true, ..TestConfiguration::none() };
        assert!(!cfg.wants_bic(), "bic requires really_all, not just all");
        assert!(!cfg.wants_diff_dist());

        let cfg = TestConfiguration { really_all: true, ..TestConfiguration::none() };
        assert!(cfg.wants_bic());
        assert!(cfg.wants_diff_dist());
    }

    #[test]
    fn quick_config_is_cheap() {
        let cfg = TestConfiguration::quick();
        assert!(cfg.wants_sanity());
        assert!(!cfg.wants_two_bytes());
        assert!(!cfg.wants_sparse());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn roundtrips_through_json() {
        let cfg = TestConfiguration::quick();
        let json = serde_json::to_string(&cfg).unwrap();
        let restored: TestConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, restored);
    }
}
