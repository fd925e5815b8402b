//! Monte Carlo estimation of the percolation threshold.
//!
//! Each trial builds a fresh [`PercolationGrid`], opens random closed
//! sites until the grid percolates, and records the fraction of open
//! sites at that moment. [`PercolationStats`] runs `T` independent trials
//! and reports the sample mean, the sample standard deviation, and a
//! normal-approximation confidence interval.
//!
//! Every trial owns its grid and its RNG, seeded from the master seed and
//! the trial index via [`trial_seed`]. Sequential and parallel runs of the
//! same [`EstimatorConfig`] therefore produce identical outcomes.

use rand::Rng;
use rayon::prelude::*;

use crate::error::{PercolationError, Result};
use crate::grid::PercolationGrid;
use crate::random::{create_rng, random_site, shuffled_indices, trial_seed};
use crate::stats;

/// z-score of a two-sided 95% normal confidence interval.
pub const CONFIDENCE_95: f64 = 1.96;

/// How a trial picks the next site to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplingStrategy {
    /// Draw uniform sites and skip those already open.
    #[default]
    Rejection,
    /// Shuffle all `n²` sites once and open them in that order.
    ShuffledPool,
}

/// Parameters of an estimation run.
///
/// # Examples
/// ```
/// use percolation::{EstimatorConfig, PercolationStats, SamplingStrategy};
///
/// let config = EstimatorConfig::new(20, 30)
///     .with_seed(7)
///     .with_strategy(SamplingStrategy::ShuffledPool);
/// let stats = PercolationStats::run(&config).unwrap();
/// assert!(stats.confidence_lo() <= stats.mean());
/// assert!(stats.mean() <= stats.confidence_hi());
/// ```
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Side length `n` of every grid.
    pub grid_size: usize,
    /// Number of independent trials `T`.
    pub trials: usize,
    /// Master seed; trial `i` uses `trial_seed(seed, i)`.
    pub seed: u64,
    /// Site selection method.
    pub strategy: SamplingStrategy,
    /// z-score for the confidence interval.
    pub confidence_z: f64,
    /// Run trials on the rayon thread pool.
    pub parallel: bool,
}

impl EstimatorConfig {
    /// Config for `trials` trials on `grid_size × grid_size` grids, with a
    /// random master seed and a 95% interval.
    pub fn new(grid_size: usize, trials: usize) -> Self {
        Self {
            grid_size,
            trials,
            seed: rand::random(),
            strategy: SamplingStrategy::default(),
            confidence_z: CONFIDENCE_95,
            parallel: false,
        }
    }

    /// Sets the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets how trials pick sites to open.
    pub fn with_strategy(mut self, strategy: SamplingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the z-score of the confidence interval.
    pub fn with_confidence_z(mut self, z: f64) -> Self {
        self.confidence_z = z;
        self
    }

    /// Runs trials on the rayon thread pool when `true`.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks the config before any trial runs.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if the grid size or trial count
    /// is zero, or the z-score is not a finite positive number.
    pub fn validate(&self) -> Result<()> {
        check_grid_size(self.grid_size)?;
        if self.trials == 0 {
            return Err(PercolationError::InvalidArgument(
                "number of trials must be greater than 0".into(),
            ));
        }
        check_confidence_z(self.confidence_z)
    }
}

fn check_grid_size(n: usize) -> Result<()> {
    if n == 0 {
        return Err(PercolationError::InvalidArgument(
            "grid size must be greater than 0".into(),
        ));
    }
    Ok(())
}

fn check_confidence_z(z: f64) -> Result<()> {
    if !z.is_finite() || z <= 0.0 {
        return Err(PercolationError::InvalidArgument(format!(
            "confidence z-score must be finite and positive, got {z}"
        )));
    }
    Ok(())
}

/// Runs one trial on a fresh `n × n` grid and returns its threshold
/// estimate `open_site_count / n²`.
///
/// # Errors
/// [`PercolationError::InvalidArgument`] if `n == 0`.
pub fn run_trial<R: Rng>(n: usize, strategy: SamplingStrategy, rng: &mut R) -> Result<f64> {
    let mut grid = PercolationGrid::new(n)?;

    match strategy {
        SamplingStrategy::Rejection => {
            while !grid.percolates() {
                let (row, col) = random_site(n, rng);
                if grid.is_open(row, col)? {
                    continue;
                }
                grid.open(row, col)?;
            }
        }
        SamplingStrategy::ShuffledPool => {
            for idx in shuffled_indices(n * n, rng) {
                grid.open(idx / n + 1, idx % n + 1)?;
                if grid.percolates() {
                    break;
                }
            }
        }
    }

    Ok(grid.open_site_count() as f64 / (n * n) as f64)
}

/// Aggregated outcome of `T` percolation trials.
#[derive(Debug, Clone)]
pub struct PercolationStats {
    grid_size: usize,
    thresholds: Vec<f64>,
    mean: f64,
    stddev: f64,
    confidence_lo: f64,
    confidence_hi: f64,
}

impl PercolationStats {
    /// Runs `trials` trials on `n × n` grids with a random seed and the
    /// default sampling strategy.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if `n == 0` or `trials == 0`.
    pub fn new(n: usize, trials: usize) -> Result<Self> {
        Self::run(&EstimatorConfig::new(n, trials))
    }

    /// Runs the trials described by `config`.
    ///
    /// # Errors
    /// Whatever [`EstimatorConfig::validate`] or a trial reports; the first
    /// failing trial aborts the run.
    pub fn run(config: &EstimatorConfig) -> Result<Self> {
        config.validate()?;
        let n = config.grid_size;

        let one = |trial: usize| -> Result<f64> {
            let mut rng = create_rng(trial_seed(config.seed, trial));
            let threshold = run_trial(n, config.strategy, &mut rng)?;
            tracing::debug!(trial, n, threshold, "trial finished");
            Ok(threshold)
        };
        let thresholds = if config.parallel {
            (0..config.trials)
                .into_par_iter()
                .map(one)
                .collect::<Result<Vec<f64>>>()?
        } else {
            (0..config.trials).map(one).collect::<Result<Vec<f64>>>()?
        };

        let stats = Self::from_thresholds(n, thresholds, config.confidence_z)?;
        tracing::info!(
            n,
            trials = config.trials,
            seed = config.seed,
            mean = stats.mean,
            stddev = stats.stddev,
            lo = stats.confidence_lo,
            hi = stats.confidence_hi,
            "percolation threshold estimated"
        );
        Ok(stats)
    }

    /// Aggregates already computed trial thresholds.
    ///
    /// A single trial has standard deviation 0. Confidence bounds are
    /// clamped to `[0, 1]`, the range of any threshold.
    ///
    /// # Errors
    /// [`PercolationError::InvalidArgument`] if `grid_size` is zero, `z` is
    /// not a finite positive number, or `thresholds` is empty or holds a
    /// value outside `[0, 1]`.
    pub fn from_thresholds(grid_size: usize, thresholds: Vec<f64>, z: f64) -> Result<Self> {
        check_grid_size(grid_size)?;
        check_confidence_z(z)?;
        if thresholds.iter().any(|t| !(0.0..=1.0).contains(t)) {
            return Err(PercolationError::InvalidArgument(
                "thresholds must lie in [0, 1]".into(),
            ));
        }
        let mean = stats::mean(&thresholds)
            .ok_or_else(|| {
                PercolationError::InvalidArgument("at least one threshold is required".into())
            })?
            .clamp(0.0, 1.0);
        let stddev = stats::std_dev(&thresholds).unwrap_or(0.0);
        let (lo, hi) = stats::confidence_interval(mean, stddev, thresholds.len(), z);

        Ok(Self {
            grid_size,
            mean,
            stddev,
            confidence_lo: lo.clamp(0.0, mean),
            confidence_hi: hi.clamp(mean, 1.0),
            thresholds,
        })
    }

    /// Sample mean of the trial thresholds.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation of the trial thresholds.
    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    /// Lower confidence bound for the threshold.
    pub fn confidence_lo(&self) -> f64 {
        self.confidence_lo
    }

    /// Upper confidence bound for the threshold.
    pub fn confidence_hi(&self) -> f64 {
        self.confidence_hi
    }

    /// Per-trial thresholds in trial order.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Number of trials aggregated.
    pub fn trials(&self) -> usize {
        self.thresholds.len()
    }

    /// Side length `n` of the simulated grids.
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }
}
