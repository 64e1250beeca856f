//! Search policy: the single configuration struct for a run.

use std::time::Duration;

use crate::distance::{BackendKind, DistanceWeights};
use crate::error::SearchError;

/// Default depth cutoff.
pub const DEFAULT_MAX_DEPTH: u32 = 20;
/// Default number of best attempts retained.
pub const DEFAULT_BEST_ATTEMPTS: usize = 30;
/// Default distance cache size.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;
/// Default dequeues between yield points.
pub const DEFAULT_BATCH_SIZE: u64 = 100;
/// Default minimum time between progress notifications.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Budgets, batching, and heuristic configuration for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPolicy {
    /// States at this depth are not expanded.
    pub max_depth: u32,
    /// Capacity of the best-attempts list.
    pub best_attempts_limit: usize,
    /// Capacity of the per-run distance cache.
    pub distance_cache_capacity: usize,
    /// Also expand ordered two-hint combinations as one move.
    pub compound_moves: bool,
    /// Dequeues between yield points in [`crate::search::SearchEngine::run`].
    pub batch_size: u64,
    /// Minimum wall-clock time between progress notifications.
    pub progress_interval: Duration,
    /// Heuristic term weights.
    pub weights: DistanceWeights,
    /// Distance backend.
    pub backend: BackendKind,
}

impl SearchPolicy {
    /// Reject out-of-range options.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if a capacity or the batch
    /// size is zero, or a weight is negative or non-finite.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.best_attempts_limit == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "best_attempts_limit must be at least 1".into(),
            });
        }
        if self.distance_cache_capacity == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "distance_cache_capacity must be at least 1".into(),
            });
        }
        if self.batch_size == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "batch_size must be at least 1".into(),
            });
        }
        if !self.weights.is_valid() {
            return Err(SearchError::InvalidPolicy {
                detail: format!(
                    "weights must be finite and non-negative, got {:?}",
                    self.weights
                ),
            });
        }
        Ok(())
    }

    /// Copy of this policy with a different depth cutoff.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            best_attempts_limit: DEFAULT_BEST_ATTEMPTS,
            distance_cache_capacity: DEFAULT_CACHE_CAPACITY,
            compound_moves: false,
            batch_size: DEFAULT_BATCH_SIZE,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            weights: DistanceWeights::default(),
            backend: BackendKind::Scalar,
        }
    }
}
