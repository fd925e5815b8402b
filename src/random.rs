//! Random number generation, shuffling, and site sampling.
//!
//! Provides seeded RNG construction, per-trial seed derivation,
//! Fisher-Yates shuffle, and uniform sampling of grid sites.
//!
//! # Reproducibility
//!
//! For reproducible experiments, use [`create_rng`] with a fixed seed.
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform.

use rand::Rng;

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++) for high performance.
/// The sequence is deterministic for a given seed on the same platform.
///
/// # Examples
/// ```
/// use percolation::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Seed for trial `trial` of a run started from `master`.
///
/// Depends only on its inputs, so a trial draws the same sites whether
/// it runs alone, in sequence, or on a worker thread. The master seed is
/// hashed before the index is mixed in, so runs from neighbouring master
/// seeds do not share trials.
pub fn trial_seed(master: u64, trial: usize) -> u64 {
    splitmix64(splitmix64(master) ^ trial as u64)
}

/// SplitMix64 finalizer (Steele, Lea & Flood 2014), a bijection on `u64`.
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Fisher-Yates (Durstenfeld) in-place shuffle.
///
/// Produces a uniformly random permutation: each of the n! permutations
/// is equally likely.
///
/// Reference: Knuth (1997), *TAOCP* Vol. 2, §3.4.2, Algorithm P.
///
/// # Complexity
/// Time: O(n), Space: O(1) (in-place)
///
/// # Examples
/// ```
/// use percolation::random::{create_rng, shuffle};
/// let mut v = vec![1, 2, 3, 4, 5];
/// let mut rng = create_rng(42);
/// shuffle(&mut v, &mut rng);
/// v.sort();
/// assert_eq!(v, vec![1, 2, 3, 4, 5]);
/// ```
pub fn shuffle<T, R: Rng>(slice: &mut [T], rng: &mut R) {
    let n = slice.len();
    if n <= 1 {
        return;
    }
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}

/// Returns a shuffled index permutation of `[0, n)`.
///
/// # Complexity
/// Time: O(n), Space: O(n)
pub fn shuffled_indices<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    shuffle(&mut indices, rng);
    indices
}

/// Draws a uniformly random 1-indexed site `(row, col)` of an `n × n` grid.
///
/// `n` must be at least 1.
pub fn random_site<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let row = rng.random_range(1..=n);
    let col = rng.random_range(1..=n);
    (row, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);
        let vals1: Vec<f64> = (0..10).map(|_| rng1.random()).collect();
        let vals2: Vec<f64> = (0..10).map(|_| rng2.random()).collect();
        assert_eq!(vals1, vals2);
    }

    #[test]
    fn test_trial_seed_distinct() {
        assert_ne!(trial_seed(7, 0), trial_seed(7, 1));
        assert_eq!(trial_seed(7, 3), trial_seed(7, 3));
    }

    #[test]
    fn test_trial_seed_neighbouring_masters_do_not_overlap() {
        for trial in 1..64 {
            assert_ne!(trial_seed(7, trial), trial_seed(8, trial - 1));
            assert_ne!(trial_seed(7, trial), trial_seed(8, trial));
        }
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut v = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut rng = create_rng(123);
        shuffle(&mut v, &mut rng);
        v.sort();
        assert_eq!(v, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_shuffle_empty() {
        let mut v: Vec<i32> = vec![];
        let mut rng = create_rng(0);
        shuffle(&mut v, &mut rng);
        assert!(v.is_empty());
    }

    #[test]
    fn test_shuffle_actually_shuffles() {
        // With 10 elements, probability of identity permutation is 1/10! ≈ 2.8e-7
        let original = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut v = original.clone();
        let mut rng = create_rng(42);
        shuffle(&mut v, &mut rng);
        assert_ne!(v, original, "shuffle should change order (probabilistic)");
    }

    #[test]
    fn test_shuffled_indices() {
        let mut rng = create_rng(42);
        let indices = shuffled_indices(10, &mut rng);
        let mut sorted = indices.clone();
        sorted.sort();
        assert_eq!(sorted, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_random_site_covers_grid() {
        let mut rng = create_rng(42);
        let n = 3;
        let mut seen = [[false; 4]; 4];
        for _ in 0..1000 {
            let (row, col) = random_site(n, &mut rng);
            assert!((1..=n).contains(&row));
            assert!((1..=n).contains(&col));
            seen[row][col] = true;
        }
        for row in 1..=n {
            for col in 1..=n {
                assert!(seen[row][col], "site ({row}, {col}) never drawn");
            }
        }
    }
}
