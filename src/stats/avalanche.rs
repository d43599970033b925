//! Avalanche bit-bias analyzer.
//!
//! For each (input bit, output bit) pair, tracks how often flipping the input
//! bit flips the output bit across many random trials. An ideal hash flips
//! each output bit with probability 0.5 regardless of which input bit moved.

/// A flip-count matrix: `counts[i][j]` is the number of trials (out of
/// `reps`) in which flipping input bit `i` changed output bit `j`.
#[derive(Debug, Clone)]
pub struct FlipMatrix {
    input_bits: usize,
    output_bits: usize,
    reps: u64,
    counts: Vec<u64>,
}

impl FlipMatrix {
    pub fn new(input_bits: usize, output_bits: usize) -> Self {
        Self { input_bits, output_bits, reps: 0, counts: vec![0u64; input_bits * output_bits] }
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        i * self.output_bits + j
    }

    /// Record one trial: `before`/`after` are the hash outputs for the
    /// original and bit-`i`-flipped inputs, both `output_bits` wide.
    pub fn record(&mut self, input_bit: usize, before_bit: impl Fn(usize) -> bool, after_bit: impl Fn(usize) -> bool) {
        for j in 0..self.output_bits {
            if before_bit(j) != after_bit(j) {
                let idx = self.index(input_bit, j);
                self.counts[idx] += 1;
            }
        }
    }

    /// Merge another matrix's counts into this one. Panics if dimensions differ.
    pub fn merge(&mut self, other: &FlipMatrix) {
        assert_eq!(self.input_bits, other.input_bits);
        assert_eq!(self.output_bits, other.output_bits);
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
        self.reps += other.reps;
    }

    pub fn add_rep(&mut self) {
        self.reps += 1;
    }

    pub fn reps(&self) -> u64 {
        self.reps
    }
}

/// Outcome of analyzing a completed [`FlipMatrix`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvalancheResult {
    pub max_bias: f64,
    pub expected_bias: f64,
    pub worst_ratio: f64,
}

impl AvalancheResult {
    /// Pass if `max_bias <= max_pct_error` (1%) and `worst_ratio <= 1.5`.
    pub fn passes(&self) -> bool {
        const MAX_PCT_ERROR: f64 = 0.01;
        const MAX_ERROR_RATIO: f64 = 1.5;
        self.max_bias <= MAX_PCT_ERROR && self.worst_ratio <= MAX_ERROR_RATIO
    }
}

/// Analyze a flip-count matrix: normalize each cell to a probability, find the
/// worst per-bit bias, and compare it to the empirically calibrated tolerance
/// for this many repetitions.
pub fn analyze(matrix: &FlipMatrix) -> AvalancheResult {
    let reps = matrix.reps.max(1) as f64;
    let max_bias = matrix
        .counts
        .iter()
        .map(|&count| {
            let f = count as f64 / reps;
            (f - 0.5).abs()
        })
        .fold(0.0f64, f64::max);

    // Empirically calibrated 1-sigma tolerance, scaling down as reps grows.
    let expected_bias = 0.00256 / (reps / 100_000.0);
    let worst_ratio = if expected_bias > 0.0 { max_bias / expected_bias } else { 0.0 };

    AvalancheResult { max_bias, expected_bias, worst_ratio }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideal_hash_has_near_zero_bias() {
        // Simulate a matrix where every cell flips exactly half the time.
        let input_bits = 4;
        let output_bits = 8;
        let reps = 1_000_000u64;
        let mut matrix = FlipMatrix::new(input_bits, output_bits);
        for _ in 0..reps {
            matrix.add_rep();
        }
        for cell in matrix.counts.iter_mut() {
            *cell = reps / 2;
        }
        let result = analyze(&matrix);
        assert!(result.passes(), "{result:?}");
        assert!(result.max_bias < 0.001);
    }

    #[test]
    fn constant_hash_has_maximal_bias() {
        // A constant-output hash never flips any output bit: f_ij = 0 for all
        // cells, so bias = 0.5 everywhere (universal property 6).
        let mut matrix = FlipMatrix::new(4, 8);
        for _ in 0..100_000u64 {
            matrix.add_rep();
        }
        // counts stay all-zero.
        let result = analyze(&matrix);
        assert!(!result.passes());
        assert!((result.max_bias - 0.5).abs() < 1e-9, "{}", result.max_bias);
    }

    #[test]
    fn merge_sums_counts_and_reps() {
        let mut a = FlipMatrix::new(2, 2);
        a.add_rep();
        a.counts[0] = 3;
        let mut b = FlipMatrix::new(2, 2);
        b.add_rep();
        b.counts[0] = 4;

        a.merge(&b);
        assert_eq!(a.reps(), 2);
        assert_eq!(a.counts[0], 7);
    }

    #[test]
    #[should_panic]
    fn merge_rejects_mismatched_dimensions() {
        let mut a = FlipMatrix::new(2, 2);
        let b = FlipMatrix::new(3, 2);
        a.merge(&b);
    }

    #[test]
    fn record_tallies_differing_bits_for_the_flipped_input_bit() {
        let mut matrix = FlipMatrix::new(1, 4);
        matrix.add_rep();
        let before = [true, false, true, false];
        let after = [true, true, true, true];
        matrix.record(0, |j| before[j], |j| after[j]);
        assert_eq!(matrix.counts[1], 1); // bit 1 differs
        assert_eq!(matrix.counts[3], 1); // bit 3 differs
        assert_eq!(matrix.counts[0], 0);
        assert_eq!(matrix.counts[2], 0);
    }
}
