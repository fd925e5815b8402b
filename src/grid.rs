//! Percolation grid backed by union-find connectivity.
//!
//! Sites of an `n × n` grid are addressed by 1-indexed `(row, col)` pairs
//! and flattened to `(row - 1) * n + col`, so real sites occupy `1..=n²`.
//! Two synthetic elements complete the union-find universe:
//!
//! | index    | meaning |
//! |----------|---------|
//! | `0`      | virtual top, above row 1 |
//! | `n² + 1` | virtual bottom, below row n |
//!
//! # Backwash
//!
//! With a single union-find containing both virtual nodes, an open
//! bottom-row site joins virtual bottom, and once the grid percolates
//! every cluster touching row n becomes connected to virtual top through
//! it. Those clusters would then be reported full although no open path
//! leads from them to row 1.
//!
//! [`PercolationGrid`] keeps two structures. `percolation` holds both
//! virtual nodes and answers [`PercolationGrid::percolates`]; `fullness`
//! holds only virtual top and answers [`PercolationGrid::is_full`].
//! Virtual nodes are wired lazily when a row-1 or row-n site opens, so
//! union work stays proportional to the number of opens.

use crate::collections::UnionFind;
use crate::error::{PercolationError, Result};

/// Flat index of the virtual node above row 1.
pub const VIRTUAL_TOP: usize = 0;

/// Flat index of the virtual node below row `n`.
pub fn virtual_bottom(n: usize) -> usize {
    n * n + 1
}

/// Checks that `(row, col)` lies in `[1, n] × [1, n]`.
///
/// # Errors
/// Returns [`PercolationError::OutOfRange`] naming the offending coordinate.
pub fn validate_site(n: usize, row: usize, col: usize) -> Result<()> {
    if row == 0 || row > n {
        return Err(PercolationError::OutOfRange(format!(
            "row {row} is outside [1, {n}]"
        )));
    }
    if col == 0 || col > n {
        return Err(PercolationError::OutOfRange(format!(
            "col {col} is outside [1, {n}]"
        )));
    }
    Ok(())
}

/// Maps a 1-indexed site to its flat union-find index in `1..=n²`.
///
/// # Examples
/// ```
/// use percolation::grid::site_index;
/// assert_eq!(site_index(3, 1, 1).unwrap(), 1);
/// assert_eq!(site_index(3, 2, 1).unwrap(), 4);
/// assert_eq!(site_index(3, 3, 3).unwrap(), 9);
/// assert!(site_index(3, 4, 1).is_err());
/// ```
pub fn site_index(n: usize, row: usize, col: usize) -> Result<usize> {
    validate_site(n, row, col)?;
    Ok((row - 1) * n + col)
}

/// Returns the in-grid orthogonal neighbors of a valid site.
///
/// Edges do not wrap: column 1 has no left neighbor and column `n` has no
/// right neighbor, likewise for rows.
pub fn neighbors(n: usize, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let up = (row > 1).then(|| (row - 1, col));
    let down = (row < n).then(|| (row + 1, col));
    let left = (col > 1).then(|| (row, col - 1));
    let right = (col < n).then(|| (row, col + 1));
    [up, down, left, right].into_iter().flatten()
}

/// An `n × n` percolation system.
///
/// Sites start closed and move to open exactly once. The grid never
/// un-opens a site, so [`percolates`](Self::percolates) is monotonic.
///
/// # Examples
/// ```
/// use percolation::PercolationGrid;
///
/// let mut grid = PercolationGrid::new(2).unwrap();
/// grid.open(1, 1).unwrap();
/// grid.open(2, 1).unwrap();
/// assert!(grid.percolates());
/// assert!(grid.is_full(2, 1).unwrap());
/// assert!(!grid.is_full(2, 2).unwrap());
/// assert_eq!(grid.open_site_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct PercolationGrid {
    n: usize,
    open: Vec<bool>,
    open_count: usize,
    percolated: bool,
    percolation: UnionFind,
    fullness: UnionFind,
}

impl PercolationGrid {
    /// Creates an `n × n` grid with every site closed.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidArgument`] if `n == 0` or if
    /// `n² + 2` does not fit in `usize`.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(PercolationError::InvalidArgument(
                "grid size must be greater than 0".into(),
            ));
        }
        let sites = n
            .checked_mul(n)
            .filter(|s| s.checked_add(2).is_some())
            .ok_or_else(|| {
                PercolationError::InvalidArgument(format!("grid size {n} is too large"))
            })?;

        Ok(Self {
            n,
            open: vec![false; sites + 1],
            open_count: 0,
            percolated: false,
            percolation: UnionFind::new(sites + 2)?,
            fullness: UnionFind::new(sites + 1)?,
        })
    }

    /// Side length `n` of the grid.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Opens the site at `(row, col)` and connects it to its open neighbors.
    ///
    /// Opening an already open site changes nothing.
    ///
    /// # Errors
    /// Returns [`PercolationError::OutOfRange`] for coordinates outside
    /// the grid; the grid is left untouched.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let idx = site_index(self.n, row, col)?;
        if self.open[idx] {
            return Ok(());
        }
        self.open[idx] = true;
        self.open_count += 1;

        for (r, c) in neighbors(self.n, row, col) {
            let other = (r - 1) * self.n + c;
            if self.open[other] {
                self.percolation.union(idx, other)?;
                self.fullness.union(idx, other)?;
            }
        }
        if row == 1 {
            self.percolation.union(idx, VIRTUAL_TOP)?;
            self.fullness.union(idx, VIRTUAL_TOP)?;
        }
        if row == self.n {
            self.percolation.union(idx, virtual_bottom(self.n))?;
        }

        if !self.percolated
            && self
                .percolation
                .connected(VIRTUAL_TOP, virtual_bottom(self.n))?
        {
            self.percolated = true;
            tracing::trace!(
                n = self.n,
                open_sites = self.open_count,
                "grid percolates"
            );
        }
        Ok(())
    }

    /// Returns whether the site at `(row, col)` is open.
    ///
    /// # Errors
    /// Returns [`PercolationError::OutOfRange`] for coordinates outside the grid.
    pub fn is_open(&self, row: usize, col: usize) -> Result<bool> {
        let idx = site_index(self.n, row, col)?;
        Ok(self.open[idx])
    }

    /// Returns whether the site is open and joined to row 1 by open sites.
    ///
    /// Answered from the structure without virtual bottom, so clusters
    /// that only touch row `n` are never reported full.
    ///
    /// # Errors
    /// Returns [`PercolationError::OutOfRange`] for coordinates outside the grid.
    pub fn is_full(&mut self, row: usize, col: usize) -> Result<bool> {
        let idx = site_index(self.n, row, col)?;
        if !self.open[idx] {
            return Ok(false);
        }
        self.fullness.connected(VIRTUAL_TOP, idx)
    }

    /// Returns whether an open path joins row 1 to row `n`.
    pub fn percolates(&self) -> bool {
        self.percolated
    }

    /// Number of open sites.
    pub fn open_site_count(&self) -> usize {
        self.open_count
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    /// Reference fullness computed by flood fill from every open row-1 site.
    fn flood_full(n: usize, open: &[Vec<bool>]) -> Vec<Vec<bool>> {
        let mut full = vec![vec![false; n + 1]; n + 1];
        let mut queue = VecDeque::new();
        for col in 1..=n {
            if open[1][col] {
                full[1][col] = true;
                queue.push_back((1, col));
            }
        }
        while let Some((row, col)) = queue.pop_front() {
            for (r, c) in neighbors(n, row, col) {
                if open[r][c] && !full[r][c] {
                    full[r][c] = true;
                    queue.push_back((r, c));
                }
            }
        }
        full
    }

    fn ops(max_n: usize) -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1..=max_n).prop_flat_map(|n| {
            (
                Just(n),
                proptest::collection::vec((1..=n, 1..=n), 0..(n * n * 2)),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn fullness_matches_flood_fill((n, sites) in ops(7)) {
            let mut grid = PercolationGrid::new(n).unwrap();
            let mut open = vec![vec![false; n + 1]; n + 1];
            for &(row, col) in &sites {
                grid.open(row, col).unwrap();
                open[row][col] = true;
            }

            let full = flood_full(n, &open);
            for row in 1..=n {
                for col in 1..=n {
                    prop_assert_eq!(
                        grid.is_full(row, col).unwrap(),
                        full[row][col],
                        "site ({}, {})", row, col
                    );
                }
            }
            let expected = (1..=n).any(|col| full[n][col]);
            prop_assert_eq!(grid.percolates(), expected);
        }

        #[test]
        fn open_is_monotonic_and_counted((n, sites) in ops(8)) {
            let mut grid = PercolationGrid::new(n).unwrap();
            let mut seen = std::collections::HashSet::new();
            let mut percolated = false;

            for &(row, col) in &sites {
                grid.open(row, col).unwrap();
                seen.insert((row, col));

                prop_assert!(!percolated || grid.percolates());
                percolated = grid.percolates();

                prop_assert_eq!(grid.open_site_count(), seen.len());
                for &(r, c) in &seen {
                    prop_assert!(grid.is_open(r, c).unwrap());
                }
            }
        }

        #[test]
        fn repeated_open_matches_single_open((n, sites) in ops(6)) {
            let mut once = PercolationGrid::new(n).unwrap();
            let mut twice = PercolationGrid::new(n).unwrap();
            for &(row, col) in &sites {
                once.open(row, col).unwrap();
                twice.open(row, col).unwrap();
                twice.open(row, col).unwrap();
            }
            prop_assert_eq!(once.open_site_count(), twice.open_site_count());
            prop_assert_eq!(once.percolates(), twice.percolates());
            for row in 1..=n {
                for col in 1..=n {
                    prop_assert_eq!(
                        once.is_open(row, col).unwrap(),
                        twice.is_open(row, col).unwrap()
                    );
                }
            }
        }
    }
}
