//! Thresholds for parallel batch execution.
//!
//! Batched calls evaluate the scalar kernel once per element. Small batches
//! run sequentially; batches at or above `parallel_threshold` fan out over
//! the rayon thread pool. Both paths produce identical results.

/// Default batch size at which rayon is used.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Configuration for batched operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchConfig {
    /// Minimum number of elements before switching to parallel execution
    pub parallel_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl BatchConfig {
    /// A configuration that never runs in parallel.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    /// Sets the parallel threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether a batch of `count` elements should run in parallel.
    #[inline]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && count >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_never_parallelizes() {
        let config = BatchConfig::sequential();
        assert!(!config.should_parallelize(1_000_000));
    }

    #[test]
    fn test_threshold() {
        let config = BatchConfig::default().with_parallel_threshold(10);
        assert!(!config.should_parallelize(9));
        assert_eq!(config.should_parallelize(10), cfg!(feature = "parallel"));
    }
}
