//! Bounded top-K list of the closest states seen in a run.

use serde::{Deserialize, Serialize};

/// A state the search reached, with its distance to the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestAttempt {
    pub text: String,
    pub path: Vec<String>,
    pub distance: f64,
}

/// The `capacity` lowest-distance attempts, deduplicated by text.
///
/// Invariants after every [`BestAttempts::record`]:
/// - `len() <= capacity`
/// - entries sorted ascending by `distance` (stable for equal distances)
/// - no two entries share a `text`
#[derive(Debug, Clone)]
pub struct BestAttempts {
    entries: Vec<BestAttempt>,
    capacity: usize,
}

impl BestAttempts {
    /// An empty list holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.min(64)),
            capacity,
        }
    }

    /// Offer an attempt.
    ///
    /// On a text collision the attempt with the shorter path wins. Returns
    /// whether the list changed.
    pub fn record(&mut self, attempt: BestAttempt) -> bool {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.text == attempt.text) {
            if attempt.path.len() < existing.path.len() {
                *existing = attempt;
                self.entries.sort_by(|a, b| a.distance.total_cmp(&b.distance));
                return true;
            }
            return false;
        }
        if self.entries.len() >= self.capacity {
            match self.entries.last() {
                Some(worst) if attempt.distance.total_cmp(&worst.distance).is_lt() => {}
                _ => return false,
            }
        }
        self.entries.push(attempt);
        self.entries.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        self.entries.truncate(self.capacity);
        true
    }

    /// Lowest-distance attempt.
    #[must_use]
    pub fn best(&self) -> Option<&BestAttempt> {
        self.entries.first()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[BestAttempt] {
        &self.entries
    }

    /// Owned copy of the current list.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BestAttempt> {
        self.entries.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
