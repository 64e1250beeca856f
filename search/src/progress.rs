//! Progress notifications emitted at yield points.

use crate::attempts::BestAttempt;

/// Snapshot of a running search.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// States dequeued so far.
    pub states_explored: u64,
    /// Lowest-distance attempt so far.
    pub current_best: Option<BestAttempt>,
    /// Current frontier size.
    pub frontier_len: usize,
}

/// Receiver of progress notifications.
pub trait ProgressSink {
    fn report(&mut self, progress: &Progress);
}

impl<F: FnMut(&Progress)> ProgressSink for F {
    fn report(&mut self, progress: &Progress) {
        self(progress);
    }
}
