//! # percolation
//!
//! Site percolation on an `n × n` grid and Monte Carlo estimation of the
//! percolation threshold.
//!
//! Sites are opened one at a time; the grid percolates once open sites
//! connect row 1 to row `n` through horizontal and vertical adjacency.
//! Connectivity is tracked incrementally with a disjoint-set forest, so
//! every open and every query costs amortized near-constant time.
//!
//! ## Modules
//!
//! - [`collections`] — Union-find with path compression and union by size
//! - [`grid`] — Coordinate helpers and the backwash-free [`PercolationGrid`]
//! - [`estimator`] — Repeated randomized trials and [`PercolationStats`]
//! - [`random`] — Seeded RNGs, shuffling, uniform site sampling
//! - [`stats`] — Mean, sample standard deviation, confidence intervals
//!
//! ## Example
//!
//! ```
//! use percolation::{EstimatorConfig, PercolationGrid, PercolationStats};
//!
//! let mut grid = PercolationGrid::new(3).unwrap();
//! for row in 1..=3 {
//!     grid.open(row, 2).unwrap();
//! }
//! assert!(grid.percolates());
//!
//! let stats = PercolationStats::run(&EstimatorConfig::new(16, 10).with_seed(1)).unwrap();
//! assert!(stats.mean() > 0.0 && stats.mean() <= 1.0);
//! ```

pub mod collections;
pub mod error;
pub mod estimator;
pub mod grid;
pub mod random;
pub mod stats;

pub use error::{PercolationError, Result};
pub use estimator::{EstimatorConfig, PercolationStats, SamplingStrategy};
pub use grid::PercolationGrid;
