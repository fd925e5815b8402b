//! Error taxonomy shared by the union-find, the grid, and the estimator.

/// Errors reported by grid construction, site operations, and estimation.
///
/// Both kinds are deterministic precondition violations; nothing in this
/// crate retries on them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PercolationError {
    /// A size, trial count, or tuning parameter is not acceptable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A site coordinate or set element lies outside the valid range.
    #[error("out of range: {0}")]
    OutOfRange(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PercolationError>;
