//! Disjoint-set (Union-Find) data structure.
//!
//! Maintains a collection of disjoint sets over elements `0..n` with
//! near-constant-time union and find operations. Sets can only be merged;
//! there is no removal and no iteration over members.
//!
//! # Algorithm
//!
//! Uses **path compression** during `find` and **union by size** during
//! `union` to achieve amortized O(α(n)) per operation, where α is the
//! inverse Ackermann function. Union by size also bounds every tree's
//! height by log₂(n), which keeps the recursive `find` shallow.
//!
//! # References
//!
//! - Tarjan (1975), "Efficiency of a Good but Not Linear Set Union Algorithm"
//! - Tarjan & van Leeuwen (1984), "Worst-Case Analysis of Set Union Algorithms"

use crate::error::{PercolationError, Result};

/// Disjoint-set forest with path compression and union by size.
///
/// Every element-indexed operation checks its arguments and reports
/// [`PercolationError::OutOfRange`] instead of panicking.
///
/// # Examples
/// ```
/// use percolation::collections::UnionFind;
///
/// let mut uf = UnionFind::new(5).unwrap();
/// assert_eq!(uf.component_count(), 5);
///
/// uf.union(0, 1).unwrap();
/// uf.union(2, 3).unwrap();
/// assert_eq!(uf.component_count(), 3);
///
/// assert!(uf.connected(0, 1).unwrap());
/// assert!(!uf.connected(0, 2).unwrap());
///
/// uf.union(1, 3).unwrap();
/// assert!(uf.connected(0, 2).unwrap()); // transitivity
/// assert!(uf.find(7).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl UnionFind {
    /// Creates a new Union-Find with `n` disjoint singleton sets `{0}, {1}, ..., {n-1}`.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidArgument`] if `n == 0`.
    ///
    /// # Complexity
    /// O(n)
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(PercolationError::InvalidArgument(
                "union-find universe must contain at least one element".into(),
            ));
        }
        Ok(Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        })
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if there are no elements.
    ///
    /// Always `false` for a successfully constructed instance.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    fn check(&self, x: usize) -> Result<()> {
        if x < self.parent.len() {
            Ok(())
        } else {
            Err(PercolationError::OutOfRange(format!(
                "element {x} is outside 0..{}",
                self.parent.len()
            )))
        }
    }

    /// Finds the representative (root) of the set containing `x`.
    ///
    /// Applies **path compression**: every node on the path from `x` to
    /// the root is made a direct child of the root.
    ///
    /// # Errors
    /// Returns [`PercolationError::OutOfRange`] if `x >= len()`.
    ///
    /// # Complexity
    /// Amortized O(α(n))
    pub fn find(&mut self, x: usize) -> Result<usize> {
        self.check(x)?;
        Ok(self.root(x))
    }

    fn root(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.root(self.parent[x]);
        }
        self.parent[x]
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Uses **union by size**: the root of the smaller tree is attached
    /// under the root of the larger one. Ties keep `x`'s root.
    ///
    /// # Returns
    /// `Ok(true)` if `x` and `y` were in different sets (and are now merged),
    /// `Ok(false)` if they were already in the same set.
    ///
    /// # Errors
    /// Returns [`PercolationError::OutOfRange`] if either element is
    /// outside `0..len()`. Nothing is merged in that case.
    pub fn union(&mut self, x: usize, y: usize) -> Result<bool> {
        self.check(x)?;
        self.check(y)?;

        let mut root_x = self.root(x);
        let mut root_y = self.root(y);
        if root_x == root_y {
            return Ok(false);
        }

        if self.size[root_x] < self.size[root_y] {
            std::mem::swap(&mut root_x, &mut root_y);
        }
        self.parent[root_y] = root_x;
        self.size[root_x] += self.size[root_y];

        self.components -= 1;
        Ok(true)
    }

    /// Returns `true` if `x` and `y` are in the same set.
    ///
    /// # Complexity
    /// Amortized O(α(n))
    pub fn connected(&mut self, x: usize, y: usize) -> Result<bool> {
        self.check(x)?;
        self.check(y)?;
        Ok(self.root(x) == self.root(y))
    }

    /// Returns the number of disjoint sets.
    ///
    /// # Complexity
    /// O(1)
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Returns the size of the set containing `x`.
    pub fn component_size(&mut self, x: usize) -> Result<usize> {
        let root = self.find(x)?;
        Ok(self.size[root])
    }
}
