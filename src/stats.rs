//! Descriptive statistics over trial outcomes.
//!
//! All functions in this module handle edge cases explicitly and use
//! numerically stable algorithms to avoid catastrophic cancellation.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier-compensated (Kahan) summation for O(ε) error independent of n.
//! - **Variance/StdDev**: Welford's online algorithm.
//!   Reference: Welford (1962), "Note on a Method for Calculating
//!   Corrected Sums of Squares and Products", *Technometrics* 4(3).
//! - **Confidence interval**: normal approximation `mean ± z·s/√n`.

/// Computes the arithmetic mean using Kahan compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::mean;
/// let v = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert!((mean(&v).unwrap() - 3.0).abs() < 1e-15);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Computes the sample variance using Welford's online algorithm.
///
/// Returns the **sample** (unbiased) variance with Bessel's correction
/// (denominator `n − 1`).
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
///
/// # Examples
/// ```
/// use percolation::stats::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-10);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    if !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let mut acc = Welford::new();
    for &x in data {
        acc.update(x);
    }
    acc.sample_variance()
}

/// Computes the sample standard deviation.
///
/// Equivalent to `sqrt(variance(data))`.
///
/// # Returns
/// - `None` if `data.len() < 2` or contains NaN/Inf.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Normal-approximation confidence interval for a sample mean.
///
/// Returns `(mean − h, mean + h)` with `h = z · std_dev / √n`.
/// With `n == 0` the half-width is taken as zero.
///
/// # Examples
/// ```
/// use percolation::stats::confidence_interval;
/// let (lo, hi) = confidence_interval(0.5, 0.1, 100, 1.96);
/// assert!((lo - 0.4804).abs() < 1e-12);
/// assert!((hi - 0.5196).abs() < 1e-12);
/// ```
pub fn confidence_interval(mean: f64, std_dev: f64, n: usize, z: f64) -> (f64, f64) {
    if n == 0 {
        return (mean, mean);
    }
    let half_width = z * std_dev / (n as f64).sqrt();
    (mean - half_width, mean + half_width)
}

/// Neumaier's improved Kahan summation.
///
/// The branch ensures the smaller operand's low-order bits are captured
/// even when the addend is larger in magnitude than the running sum.
///
/// Reference: Neumaier (1974), *Zeitschrift für Angewandte Mathematik
/// und Mechanik* 54(1), pp. 39–51.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

// ---------------------------------------------------------------------------
// Welford online accumulator
// ---------------------------------------------------------------------------

/// Running mean and sum of squared deviations (Welford's update).
struct Welford {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Welford {
    fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Sample variance (n − 1 denominator), `None` below 2 samples.
    fn sample_variance(&self) -> Option<f64> {
        if self.count < 2 {
            None
        } else {
            Some(self.m2 / (self.count - 1) as f64)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Threshold-like samples in (0, 1].
    fn unit_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(0.001_f64..=1.0, min_len..=max_len)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn variance_non_negative(data in unit_vec(2, 100)) {
            let var = variance(&data).unwrap();
            prop_assert!(var >= 0.0, "variance must be >= 0, got {}", var);
        }

        #[test]
        fn mean_within_bounds(data in unit_vec(1, 100)) {
            let m = mean(&data).unwrap();
            let lo = data.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(m >= lo - 1e-12 && m <= hi + 1e-12);
        }

        #[test]
        fn interval_contains_mean(
            m in 0.0_f64..1.0,
            s in 0.0_f64..1.0,
            n in 1_usize..1000,
        ) {
            let (lo, hi) = confidence_interval(m, s, n, 1.96);
            prop_assert!(lo <= m && m <= hi);
        }

        #[test]
        fn variance_is_shift_invariant(data in unit_vec(2, 100), shift in 0.0_f64..10.0) {
            let shifted: Vec<f64> = data.iter().map(|x| x + shift).collect();
            let a = variance(&data).unwrap();
            let b = variance(&shifted).unwrap();
            prop_assert!((a - b).abs() < 1e-9, "{} vs {}", a, b);
        }
    }
}
