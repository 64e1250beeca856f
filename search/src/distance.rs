//! Composite string distance used as the search heuristic.
//!
//! `h(current, target) = edit * W_edit + |len diff| * W_len + freq * W_freq`
//!
//! - `edit`: Levenshtein distance (insert/delete/substitute cost 1).
//! - `len diff`: difference in `char` counts.
//! - `freq`: sum over the union of characters of the absolute difference
//!   in per-character counts.
//!
//! The two expensive terms are computed by a [`DistanceBackend`]. Backends
//! are a pure performance substitution: every backend must return the same
//! integers for the same inputs, so the composite score never depends on
//! which one is active.

use std::collections::{BTreeMap, HashMap};

use crate::cache::BoundedCache;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Weights of the three heuristic terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceWeights {
    pub edit: f64,
    pub length: f64,
    pub frequency: f64,
}

impl DistanceWeights {
    /// Whether every weight is finite and non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.edit, self.length, self.frequency]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }

    /// Combine raw term values into the composite score.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn combine(&self, edit: usize, length_diff: usize, frequency: usize) -> f64 {
        edit as f64 * self.edit + length_diff as f64 * self.length + frequency as f64 * self.frequency
    }
}

impl Default for DistanceWeights {
    fn default() -> Self {
        Self {
            edit: 2.0,
            length: 0.5,
            frequency: 0.3,
        }
    }
}

// ---------------------------------------------------------------------------
// Backends
// ---------------------------------------------------------------------------

/// Strategy computing the two expensive distance terms.
///
/// Implementations must be deterministic and agree exactly with
/// [`edit_distance`] and [`char_frequency_distance`].
pub trait DistanceBackend: Send + std::fmt::Debug {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Levenshtein distance over `char`s.
    fn edit_distance(&mut self, a: &str, b: &str) -> usize;

    /// Sum of absolute per-character count differences.
    fn char_frequency_distance(&mut self, a: &str, b: &str) -> usize;

    /// Pre-allocate working memory. Must be idempotent.
    fn warm_up(&mut self) {}
}

/// Which backend a search uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Allocate-per-call reference implementation.
    #[default]
    Scalar,
    /// Reuses its DP rows and counting table across calls.
    Buffered,
}

impl BackendKind {
    /// Construct a fresh backend of this kind.
    #[must_use]
    pub fn build(self) -> Box<dyn DistanceBackend> {
        match self {
            Self::Scalar => Box::new(ScalarBackend),
            Self::Buffered => Box::new(BufferedBackend::default()),
        }
    }
}

/// Reference backend: full DP matrix and an ordered count map.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarBackend;

impl DistanceBackend for ScalarBackend {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn edit_distance(&mut self, a: &str, b: &str) -> usize {
        edit_distance(a, b)
    }

    fn char_frequency_distance(&mut self, a: &str, b: &str) -> usize {
        char_frequency_distance(a, b)
    }
}

/// Accelerated backend: two-row Levenshtein over reused buffers.
#[derive(Debug, Default)]
pub struct BufferedBackend {
    left: Vec<char>,
    right: Vec<char>,
    rows: Vec<usize>,
    counts: HashMap<char, (usize, usize)>,
}

/// Initial buffer size reserved by [`BufferedBackend::warm_up`].
const WARM_UP_CHARS: usize = 64;

impl DistanceBackend for BufferedBackend {
    fn name(&self) -> &'static str {
        "buffered"
    }

    fn edit_distance(&mut self, a: &str, b: &str) -> usize {
        self.left.clear();
        self.left.extend(a.chars());
        self.right.clear();
        self.right.extend(b.chars());
        let (n, m) = (self.left.len(), self.right.len());
        if n == 0 {
            return m;
        }
        if m == 0 {
            return n;
        }

        let width = m + 1;
        self.rows.clear();
        self.rows.resize(width * 2, 0);
        for (j, cell) in self.rows[..width].iter_mut().enumerate() {
            *cell = j;
        }

        let (mut prev, mut curr) = (0, width);
        for i in 1..=n {
            self.rows[curr] = i;
            for j in 1..=m {
                let cost = usize::from(self.left[i - 1] != self.right[j - 1]);
                let deletion = self.rows[prev + j] + 1;
                let insertion = self.rows[curr + j - 1] + 1;
                let substitution = self.rows[prev + j - 1] + cost;
                self.rows[curr + j] = deletion.min(insertion).min(substitution);
            }
            std::mem::swap(&mut prev, &mut curr);
        }
        self.rows[prev + m]
    }

    fn char_frequency_distance(&mut self, a: &str, b: &str) -> usize {
        self.counts.clear();
        for ch in a.chars() {
            self.counts.entry(ch).or_default().0 += 1;
        }
        for ch in b.chars() {
            self.counts.entry(ch).or_default().1 += 1;
        }
        self.counts.values().map(|(x, y)| x.abs_diff(*y)).sum()
    }

    fn warm_up(&mut self) {
        self.left.reserve(WARM_UP_CHARS);
        self.right.reserve(WARM_UP_CHARS);
        self.rows.reserve((WARM_UP_CHARS + 1) * 2);
        self.counts.reserve(WARM_UP_CHARS);
    }
}

/// Levenshtein distance over `char`s with a full DP matrix.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut matrix = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }
    matrix[a.len()][b.len()]
}

/// Sum over the union of characters of `|count_a(c) - count_b(c)|`.
#[must_use]
pub fn char_frequency_distance(a: &str, b: &str) -> usize {
    let mut counts: BTreeMap<char, (usize, usize)> = BTreeMap::new();
    for ch in a.chars() {
        counts.entry(ch).or_default().0 += 1;
    }
    for ch in b.chars() {
        counts.entry(ch).or_default().1 += 1;
    }
    counts.values().map(|(x, y)| x.abs_diff(*y)).sum()
}

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

/// Cached composite heuristic for one search run.
#[derive(Debug)]
pub struct DistanceEstimator {
    weights: DistanceWeights,
    backend: Box<dyn DistanceBackend>,
    cache: BoundedCache<(String, String), f64>,
    hits: u64,
    misses: u64,
}

impl DistanceEstimator {
    /// Create an estimator around `backend` with a cache of `cache_capacity` pairs.
    #[must_use]
    pub fn new(
        weights: DistanceWeights,
        backend: Box<dyn DistanceBackend>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            weights,
            backend,
            cache: BoundedCache::new(cache_capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Score `current` against `target`, consulting the cache first.
    ///
    /// Non-negative, and `0.0` iff `current == target` (given non-zero edit weight).
    pub fn heuristic(&mut self, current: &str, target: &str) -> f64 {
        let key = (current.to_owned(), target.to_owned());
        if let Some(&value) = self.cache.get(&key) {
            self.hits += 1;
            return value;
        }
        self.misses += 1;
        let value = self.score(current, target);
        self.cache.insert(key, value);
        value
    }

    /// Score without touching the cache.
    pub fn score(&mut self, current: &str, target: &str) -> f64 {
        if current == target {
            return 0.0;
        }
        let edit = self.backend.edit_distance(current, target);
        let length_diff = current.chars().count().abs_diff(target.chars().count());
        let frequency = self.backend.char_frequency_distance(current, target);
        self.weights.combine(edit, length_diff, frequency)
    }

    /// Forward to the backend's warm-up.
    pub fn warm_up(&mut self) {
        self.backend.warm_up();
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Entries currently cached.
    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// `(hits, misses)` since construction.
    #[must_use]
    pub fn cache_stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Cached pairs dropped to stay within capacity.
    #[must_use]
    pub fn cache_evictions(&self) -> u64 {
        self.cache.evictions()
    }
}
