//! `SearchEngine`: step-wise best-first search over hint applications.
//!
//! One engine per request. Lifecycle:
//! `Idle → Running → {Found, Exhausted, Cancelled}`. A finished engine keeps
//! returning its outcome and is never resumed.

use std::time::Instant;

use log::{debug, info, trace};
use tanuki_kernel::hints::catalog::HintCatalog;
use tanuki_kernel::operators::apply::decode;

use crate::attempts::{BestAttempt, BestAttempts};
use crate::cancel::CancellationToken;
use crate::distance::{BackendKind, DistanceEstimator};
use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::node::{Move, SearchState};
use crate::policy::SearchPolicy;
use crate::progress::{Progress, ProgressSink};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Where an engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Idle,
    Running,
    Found,
    Exhausted,
    Cancelled,
}

impl EngineStatus {
    /// Whether the engine has reached a terminal state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted | Self::Cancelled)
    }
}

/// Terminal payload of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The target was reached. `steps.len() == path.len() + 1`.
    Found {
        path: Vec<String>,
        steps: Vec<String>,
        best_attempts: Vec<BestAttempt>,
    },
    /// Frontier emptied (or every remaining state hit the depth cutoff).
    Exhausted { best_attempts: Vec<BestAttempt> },
    /// Cancellation was observed at a yield point.
    Cancelled { best_attempts: Vec<BestAttempt> },
}

impl SearchOutcome {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// The found path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&[String]> {
        match self {
            Self::Found { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The best-attempts snapshot carried by every outcome.
    #[must_use]
    pub fn best_attempts(&self) -> &[BestAttempt] {
        match self {
            Self::Found { best_attempts, .. }
            | Self::Exhausted { best_attempts }
            | Self::Cancelled { best_attempts } => best_attempts,
        }
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States dequeued.
    pub states_explored: u64,
    /// States pushed onto the frontier (including the root).
    pub states_enqueued: u64,
    /// Successors dropped because their text was already visited.
    pub duplicates_suppressed: u64,
    /// Dequeued states not expanded because of the depth cutoff.
    pub depth_pruned: u64,
    /// Largest frontier size seen.
    pub frontier_high_water: u64,
    /// Deepest dequeued state.
    pub max_depth_reached: u32,
}

/// Outcome plus statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

/// What one call to [`SearchEngine::step`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The popped state was expanded into `children` new frontier entries.
    Expanded {
        text: String,
        depth: u32,
        children: usize,
    },
    /// The popped state sat at the depth cutoff and was not expanded.
    Pruned { text: String, depth: u32 },
    /// The engine is in a terminal state.
    Finished(SearchOutcome),
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// One best-first search run.
#[derive(Debug)]
pub struct SearchEngine {
    start: String,
    target: String,
    catalog: HintCatalog,
    policy: SearchPolicy,
    estimator: DistanceEstimator,
    frontier: BestFirstFrontier,
    attempts: BestAttempts,
    status: EngineStatus,
    outcome: Option<SearchOutcome>,
    stats: SearchStats,
    next_creation_order: u64,
}

impl SearchEngine {
    /// Validate inputs and build an idle engine.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyStart`], [`SearchError::EmptyTarget`],
    /// [`SearchError::EmptyHintSet`], or [`SearchError::InvalidPolicy`].
    /// No frontier work happens before these checks pass.
    pub fn new(
        start: impl Into<String>,
        target: impl Into<String>,
        catalog: HintCatalog,
        policy: SearchPolicy,
    ) -> Result<Self, SearchError> {
        let start = start.into();
        let target = target.into();
        if start.is_empty() {
            return Err(SearchError::EmptyStart);
        }
        if target.is_empty() {
            return Err(SearchError::EmptyTarget);
        }
        if catalog.is_empty() {
            return Err(SearchError::EmptyHintSet);
        }
        policy.validate()?;

        let mut estimator = DistanceEstimator::new(
            policy.weights,
            policy.backend.build(),
            policy.distance_cache_capacity,
        );
        if policy.backend == BackendKind::Buffered {
            estimator.warm_up();
        }
        let attempts = BestAttempts::new(policy.best_attempts_limit);

        Ok(Self {
            start,
            target,
            catalog,
            policy,
            estimator,
            frontier: BestFirstFrontier::new(),
            attempts,
            status: EngineStatus::Idle,
            outcome: None,
            stats: SearchStats::default(),
            next_creation_order: 0,
        })
    }

    /// Seed the frontier with the start state.
    fn initialize(&mut self) {
        debug!(
            "search init: {:?} -> {:?}, {} hints, max_depth {}, backend {}",
            self.start,
            self.target,
            self.catalog.len(),
            self.policy.max_depth,
            self.estimator.backend_name()
        );
        self.status = EngineStatus::Running;
        if self.start == self.target {
            self.finish(SearchOutcome::Found {
                path: Vec::new(),
                steps: vec![self.start.clone()],
                best_attempts: Vec::new(),
            });
            return;
        }
        let h = self.estimator.heuristic(&self.start, &self.target);
        let root = SearchState::root(self.start.clone(), h);
        self.next_creation_order = 1;
        if self.frontier.push(root) {
            self.stats.states_enqueued += 1;
        }
    }

    /// Dequeue and process one state.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Replay`] if replaying a found path hits a
    /// name the catalog does not declare.
    pub fn step(&mut self) -> Result<Step, SearchError> {
        if let Some(outcome) = &self.outcome {
            return Ok(Step::Finished(outcome.clone()));
        }
        if self.status == EngineStatus::Idle {
            self.initialize();
            if let Some(outcome) = &self.outcome {
                return Ok(Step::Finished(outcome.clone()));
            }
        }

        let Some(state) = self.frontier.pop() else {
            let outcome = SearchOutcome::Exhausted {
                best_attempts: self.attempts.snapshot(),
            };
            return Ok(Step::Finished(self.finish(outcome)));
        };
        self.stats.states_explored += 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(state.depth);

        self.attempts.record(BestAttempt {
            text: state.text.clone(),
            path: state.path(),
            distance: state.h_cost,
        });

        if state.text == self.target {
            let steps = self.replay_moves(&state.moves)?;
            let outcome = SearchOutcome::Found {
                path: state.path(),
                steps,
                best_attempts: self.attempts.snapshot(),
            };
            return Ok(Step::Finished(self.finish(outcome)));
        }

        if state.depth >= self.policy.max_depth {
            self.stats.depth_pruned += 1;
            trace!("pruned {:?} at depth {}", state.text, state.depth);
            return Ok(Step::Pruned {
                text: state.text,
                depth: state.depth,
            });
        }

        let children = self.expand(&state);
        trace!(
            "expanded {:?} at depth {} into {children} states",
            state.text,
            state.depth
        );
        Ok(Step::Expanded {
            text: state.text,
            depth: state.depth,
            children,
        })
    }

    /// Run up to `max_steps` steps. Returns the outcome if the run finished.
    ///
    /// # Errors
    ///
    /// Propagates [`SearchEngine::step`] errors.
    pub fn run_batch(&mut self, max_steps: u64) -> Result<Option<SearchOutcome>, SearchError> {
        for _ in 0..max_steps {
            if let Step::Finished(outcome) = self.step()? {
                return Ok(Some(outcome));
            }
        }
        Ok(None)
    }

    /// Run to a terminal state, yielding every `batch_size` dequeues.
    ///
    /// At each yield point the token is checked and, once
    /// `progress_interval` has elapsed since the last report, `sink`
    /// receives a [`Progress`] snapshot.
    ///
    /// # Errors
    ///
    /// Propagates [`SearchEngine::step`] errors.
    pub fn run(
        &mut self,
        cancel: &CancellationToken,
        sink: &mut dyn ProgressSink,
    ) -> Result<SearchReport, SearchError> {
        let mut last_report = Instant::now();
        loop {
            if cancel.is_cancelled() {
                let outcome = self.cancel();
                return Ok(self.report(outcome));
            }
            if let Some(outcome) = self.run_batch(self.policy.batch_size)? {
                return Ok(self.report(outcome));
            }
            if last_report.elapsed() >= self.policy.progress_interval {
                sink.report(&self.progress());
                last_report = Instant::now();
            }
        }
    }

    /// Stop the run, keeping whatever attempts were accumulated.
    ///
    /// A no-op returning the existing outcome if the run already finished.
    pub fn cancel(&mut self) -> SearchOutcome {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }
        let outcome = SearchOutcome::Cancelled {
            best_attempts: self.attempts.snapshot(),
        };
        self.finish(outcome)
    }

    /// Current progress snapshot.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            states_explored: self.stats.states_explored,
            current_best: self.attempts.best().cloned(),
            frontier_len: self.frontier.len(),
        }
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        self.status
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn best_attempts(&self) -> &[BestAttempt] {
        self.attempts.as_slice()
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            frontier_high_water: self.frontier.high_water(),
            ..self.stats
        }
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    #[must_use]
    pub fn catalog(&self) -> &HintCatalog {
        &self.catalog
    }

    fn report(&self, outcome: SearchOutcome) -> SearchReport {
        SearchReport {
            outcome,
            stats: self.stats(),
        }
    }

    fn finish(&mut self, outcome: SearchOutcome) -> SearchOutcome {
        self.status = match outcome {
            SearchOutcome::Found { .. } => EngineStatus::Found,
            SearchOutcome::Exhausted { .. } => EngineStatus::Exhausted,
            SearchOutcome::Cancelled { .. } => EngineStatus::Cancelled,
        };
        let stats = self.stats();
        info!(
            "search {:?}: explored {}, enqueued {}, duplicates {}, pruned {}, high water {}",
            self.status,
            stats.states_explored,
            stats.states_enqueued,
            stats.duplicates_suppressed,
            stats.depth_pruned,
            stats.frontier_high_water
        );
        let (hits, misses) = self.estimator.cache_stats();
        debug!(
            "visited {} texts; distance cache {} entries, {hits} hits, {misses} misses, {} evictions",
            self.frontier.visited_count(),
            self.estimator.cache_len(),
            self.estimator.cache_evictions()
        );
        self.outcome = Some(outcome.clone());
        outcome
    }

    /// Replay `moves` from the start, one step per move.
    fn replay_moves(&self, moves: &[Move]) -> Result<Vec<String>, SearchError> {
        let mut steps = Vec::with_capacity(moves.len() + 1);
        steps.push(self.start.clone());
        let mut current = self.start.clone();
        for mv in moves {
            let names = mv.hint_names();
            current = decode(&current, names.as_slice(), &self.catalog)?;
            steps.push(current.clone());
        }
        Ok(steps)
    }

    /// Enqueue every unvisited successor of `state`. Returns how many were added.
    fn expand(&mut self, state: &SearchState) -> usize {
        let Self {
            target,
            catalog,
            policy,
            estimator,
            frontier,
            stats,
            next_creation_order,
            ..
        } = self;
        let mut ctx = Expansion {
            target,
            estimator,
            frontier,
            stats,
            next_creation_order,
        };

        let hints = catalog.list_all();
        let mut added = 0;
        for hint in hints {
            if !hint.operation.can_apply(&state.text) {
                continue;
            }
            let text = hint.operation.apply(&state.text);
            if ctx.enqueue(state, text, Move::Single(hint.name.clone())) {
                added += 1;
            }
        }

        if policy.compound_moves {
            for first in hints {
                if !first.operation.can_apply(&state.text) {
                    continue;
                }
                let middle = first.operation.apply(&state.text);
                for second in hints {
                    if second.name == first.name || !second.operation.can_apply(&middle) {
                        continue;
                    }
                    let text = second.operation.apply(&middle);
                    let mv = Move::Compound(first.name.clone(), second.name.clone());
                    if ctx.enqueue(state, text, mv) {
                        added += 1;
                    }
                }
            }
        }
        added
    }
}

/// Mutable engine fields borrowed while iterating the catalog.
struct Expansion<'a> {
    target: &'a str,
    estimator: &'a mut DistanceEstimator,
    frontier: &'a mut BestFirstFrontier,
    stats: &'a mut SearchStats,
    next_creation_order: &'a mut u64,
}

impl Expansion<'_> {
    fn enqueue(&mut self, parent: &SearchState, text: String, mv: Move) -> bool {
        if self.frontier.is_visited(&text) {
            self.stats.duplicates_suppressed += 1;
            return false;
        }
        let h = self.estimator.heuristic(&text, self.target);
        let child = parent.child(text, mv, h, *self.next_creation_order);
        *self.next_creation_order += 1;
        if self.frontier.push(child) {
            self.stats.states_enqueued += 1;
            true
        } else {
            self.stats.duplicates_suppressed += 1;
            false
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience entry points
// ---------------------------------------------------------------------------

/// Run a search to completion with no cancellation and no progress.
///
/// # Errors
///
/// Returns construction errors from [`SearchEngine::new`] and replay errors
/// from [`SearchEngine::step`].
pub fn find_path(
    start: &str,
    target: &str,
    catalog: &HintCatalog,
    policy: &SearchPolicy,
) -> Result<SearchReport, SearchError> {
    let mut engine = SearchEngine::new(start, target, catalog.clone(), policy.clone())?;
    engine.run(&CancellationToken::new(), &mut |_: &Progress| {})
}

/// Whether `target` is reachable from `start` within `max_depth` hops.
///
/// # Errors
///
/// Same as [`find_path`].
pub fn can_transform(
    start: &str,
    target: &str,
    catalog: &HintCatalog,
    max_depth: u32,
) -> Result<bool, SearchError> {
    let policy = SearchPolicy::default().with_max_depth(max_depth);
    Ok(find_path(start, target, catalog, &policy)?.outcome.is_found())
}
