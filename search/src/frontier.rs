//! Best-first frontier with a per-run visited set.
//!
//! A text enters the visited set the moment it is first enqueued and never
//! leaves it, so no text is enqueued (or expanded) twice in one run.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::node::{FrontierKey, SearchState};

/// A frontier entry wrapping a state with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest `f_cost` first).
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    state: SearchState,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier manager.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the best state
/// - A `HashSet<String>` of every text reached in this run
#[derive(Debug, Default)]
pub struct BestFirstFrontier {
    heap: BinaryHeap<FrontierEntry>,
    visited: HashSet<String>,
    high_water: u64,
}

impl BestFirstFrontier {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a state and mark its text as visited.
    ///
    /// Returns `false` if the text was already visited (state not added).
    pub fn push(&mut self, state: SearchState) -> bool {
        if !self.visited.insert(state.text.clone()) {
            return false;
        }
        self.heap.push(FrontierEntry {
            key: Reverse(FrontierKey::from(&state)),
            state,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        true
    }

    /// Pop the best (lowest `f_cost`) state.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchState> {
        self.heap.pop().map(|e| e.state)
    }

    /// Whether `text` has been reached in this run.
    #[must_use]
    pub fn is_visited(&self, text: &str) -> bool {
        self.visited.contains(text)
    }

    /// Number of distinct texts reached.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Current frontier size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the frontier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of frontier size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
