//! Connectivity data structures.

mod union_find;

pub use union_find::UnionFind;
