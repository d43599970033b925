//! Bit Independence Criterion analyzer.
//!
//! Like avalanche, but for every input bit `i` and output bit pair `(j, k)`,
//! tracks the joint distribution of `(ΔH_j, ΔH_k)` — whether flipping input
//! bit `i` flips output bits `j` and `k` independently. An ideal hash has
//! `P(ΔH_j, ΔH_k) = P(ΔH_j) * P(ΔH_k)` for every pair.

/// Joint flip-count tally for one input bit, over every output bit pair.
///
/// `joint[j][k]` holds four counters indexed by `(flip_j as usize) << 1 |
/// flip_k as usize`, i.e. the count of trials landing in each of the four
/// `(ΔH_j, ΔH_k)` quadrants.
#[derive(Debug, Clone)]
pub struct JointTally {
    output_bits: usize,
    reps: u64,
    // Flattened [j][k][quadrant] where j < output_bits, k < output_bits, quadrant in 0..4.
    counts: Vec<u64>,
}

impl JointTally {
    pub fn new(output_bits: usize) -> Self {
        Self { output_bits, reps: 0, counts: vec![0u64; output_bits * output_bits * 4] }
    }

    #[inline]
    fn index(&self, j: usize, k: usize, quadrant: usize) -> usize {
        (j * self.output_bits + k) * 4 + quadrant
    }

    pub fn add_rep(&mut self) {
        self.reps += 1;
    }

    pub fn reps(&self) -> u64 {
        self.reps
    }

    /// Record one trial given which output bits flipped.
    pub fn record(&mut self, flipped: impl Fn(usize) -> bool) {
        let flips: Vec<bool> = (0..self.output_bits).map(&flipped).collect();
        for j in 0..self.output_bits {
            for k in 0..self.output_bits {
                if j == k {
                    continue;
                }
                let quadrant = (flips[j] as usize) << 1 | flips[k] as usize;
                let idx = self.index(j, k, quadrant);
                self.counts[idx] += 1;
            }
        }
    }

    pub fn merge(&mut self, other: &JointTally) {
        assert_eq!(self.output_bits, other.output_bits);
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
        self.reps += other.reps;
    }

    fn quadrant_count(&self, j: usize, k: usize, quadrant: usize) -> u64 {
        self.counts[self.index(j, k, quadrant)]
    }
}

/// Outcome of analyzing a completed [`JointTally`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BicResult {
    pub max_bias: f64,
    pub threshold: f64,
}

impl BicResult {
    pub fn passes(&self) -> bool {
        self.max_bias <= self.threshold
    }
}

/// Analyze a joint tally: for every output bit pair, compute the marginal
/// flip probabilities `P(ΔH_j)`, `P(ΔH_k)`, the joint `P(ΔH_j, ΔH_k)` for each
/// quadrant, and the bias of the joint vs the product of marginals. The
/// maximum such bias across all pairs and quadrants is the reported
/// statistic, compared against a threshold that loosens as `reps` grows
/// (sampling noise shrinks as `1/sqrt(reps)`).
pub fn analyze(tally: &JointTally) -> BicResult {
    let reps = tally.reps.max(1) as f64;
    let mut max_bias = 0.0f64;

    for j in 0..tally.output_bits {
        for k in 0..tally.output_bits {
            if j == k {
                continue;
            }
            let p00 = tally.quadrant_count(j, k, 0b00) as f64 / reps;
            let p01 = tally.quadrant_count(j, k, 0b01) as f64 / reps;
            let p10 = tally.quadrant_count(j, k, 0b10) as f64 / reps;
            let p11 = tally.quadrant_count(j, k, 0b11) as f64 / reps;

            let p_j1 = p10 + p11; // P(flip_j)
            let p_k1 = p01 + p11; // P(flip_k)

            for (observed, expected) in [
                (p00, (1.0 - p_j1) * (1.0 - p_k1)),
                (p01, (1.0 - p_j1) * p_k1),
                (p10, p_j1 * (1.0 - p_k1)),
                (p11, p_j1 * p_k1),
            ] {
                let bias = (observed - expected).abs();
                if bias > max_bias {
                    max_bias = bias;
                }
            }
        }
    }

    // Aggregate maximum bias compared to a threshold scaled by sqrt(reps); a
    // base tolerance of 0.01 at reps = 1 shrinks toward 0 as reps grows.
    let threshold = 0.01 / reps.sqrt().max(1.0) * 100.0;

    BicResult { max_bias, threshold }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn independent_bits_have_low_bias() {
        // Every quadrant equally likely => independent by construction.
        let mut tally = JointTally::new(4);
        let reps = 400_000u64;
        for _ in 0..reps {
            tally.add_rep();
        }
        let quarter = reps / 4;
        for j in 0..4 {
            for k in 0..4 {
                if j == k {
                    continue;
                }
                for q in 0..4 {
                    let idx = tally.index(j, k, q);
                    tally.counts[idx] = quarter;
                }
            }
        }
        let result = analyze(&tally);
        assert!(result.passes(), "{result:?}");
    }

    #[test]
    fn perfectly_correlated_bits_have_high_bias() {
        // flip_j always equals flip_k => only quadrants 00 and 11 ever occur.
        let mut tally = JointTally::new(2);
        let reps = 100_000u64;
        for _ in 0..reps {
            tally.add_rep();
        }
        let idx00 = tally.index(0, 1, 0b00);
        let idx11 = tally.index(0, 1, 0b11);
        tally.counts[idx00] = reps / 2;
        tally.counts[idx11] = reps / 2;
        let result = analyze(&tally);
        assert!(!result.passes(), "{result:?}");
        assert!(result.max_bias > 0.2);
    }

    #[test]
    fn merge_sums_counts() {
        let mut a = JointTally::new(2);
        a.add_rep();
        let mut b = JointTally::new(2);
        b.add_rep();
        let idx = a.index(0, 1, 0);
        a.counts[idx] = 1;
        b.counts[idx] = 2;
        a.merge(&b);
        assert_eq!(a.counts[idx], 3);
        assert_eq!(a.reps(), 2);
    }

    #[test]
    fn record_updates_every_unordered_pair() {
        let mut tally = JointTally::new(3);
        tally.add_rep();
        let flips = [true, false, true];
        tally.record(|j| flips[j]);
        // j=0,k=2 both flip => quadrant 0b11
        assert_eq!(tally.quadrant_count(0, 2, 0b11), 1);
        // j=0,k=1 => flip_j true, flip_k false => quadrant 0b10
        assert_eq!(tally.quadrant_count(0, 1, 0b10), 1);
    }
}
