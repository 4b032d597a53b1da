//! Portable parallel iteration
//!
//! - `native` feature: rayon thread pool
//! - otherwise: sequential iteration
//!
//! Results are always returned in index order, so callers that reduce them
//! sequentially get the same floating-point result with and without threads.

/// Check if parallel processing is available
#[inline]
pub fn is_parallel_available() -> bool {
    cfg!(feature = "native")
}

/// Parallel map over a range of indices
#[cfg(feature = "native")]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    use rayon::prelude::*;
    (0..count).into_par_iter().map(f).collect()
}

/// Parallel map over a range of indices
#[cfg(not(feature = "native"))]
pub fn parallel_map_indexed<U, F>(count: usize, f: F) -> Vec<U>
where
    F: Fn(usize) -> U,
{
    (0..count).map(f).collect()
}

/// Map over a range of indices, in parallel only if `parallel` is set
pub fn map_indexed<U, F>(count: usize, parallel: bool, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(usize) -> U + Sync + Send,
{
    if parallel && is_parallel_available() {
        parallel_map_indexed(count, f)
    } else {
        (0..count).map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_map_indexed() {
        let result = parallel_map_indexed(5, |i| i * 2);
        assert_eq!(result, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_map_indexed_keeps_order() {
        let sequential = map_indexed(100, false, |i| (i as f64).sqrt());
        let parallel = map_indexed(100, true, |i| (i as f64).sqrt());
        assert_eq!(sequential, parallel);
    }
}
