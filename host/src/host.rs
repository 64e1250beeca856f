//! `SearchHost`: one background worker thread per active search.
//!
//! Commands are handled on the caller's thread. Engine construction (and
//! its input validation) happens there too, so a bad request is answered
//! with an `error` event before any thread is spawned.
//!
//! Each worker owns its engine and two flags shared with the host:
//! `cancel` (explicit `cancel` command, produces a `cancelled` event) and
//! `discard` (superseded by a newer search, produces nothing).

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::{debug, error, info, warn};
use tanuki_kernel::hints::catalog::HintCatalog;
use tanuki_kernel::hints::operation::Hint;
use tanuki_search::cancel::CancellationToken;
use tanuki_search::distance::BackendKind;
use tanuki_search::error::SearchError;
use tanuki_search::progress::Progress;
use tanuki_search::search::SearchEngine;

use crate::config::HostConfig;
use crate::error::HostError;
use crate::protocol::{Command, Event};

/// Handle to the live worker.
struct ActiveSearch {
    id: u64,
    cancel: CancellationToken,
    discard: CancellationToken,
    handle: JoinHandle<()>,
}

/// Runs at most one search at a time on a background thread.
pub struct SearchHost {
    config: HostConfig,
    events: Sender<Event>,
    accelerated: bool,
    active: Option<ActiveSearch>,
    next_id: u64,
}

impl SearchHost {
    /// Create a host and the receiver its events arrive on.
    #[must_use]
    pub fn new(config: HostConfig) -> (Self, Receiver<Event>) {
        let (events, rx) = mpsc::channel();
        let host = Self {
            config,
            events,
            accelerated: false,
            active: None,
            next_id: 0,
        };
        (host, rx)
    }

    /// Dispatch one command.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Spawn`] if a worker thread cannot be started.
    pub fn handle(&mut self, command: Command) -> Result<(), HostError> {
        match command {
            Command::Init => {
                self.init();
                Ok(())
            }
            Command::Search {
                start,
                target,
                hints,
                max_depth,
            } => self.start_search(start, target, hints, max_depth),
            Command::Cancel => {
                self.cancel();
                Ok(())
            }
        }
    }

    /// Warm up the accelerated distance backend. Always emits `initialized`.
    pub fn init(&mut self) {
        if self.accelerated {
            debug!("init: accelerated backend already warm");
        } else {
            let mut backend = BackendKind::Buffered.build();
            backend.warm_up();
            self.accelerated = true;
            info!("init: {} distance backend ready", backend.name());
        }
        self.emit(Event::Initialized);
    }

    /// Build an engine for the request and run it on a fresh worker.
    ///
    /// Any live search is discarded first. Invalid input is answered with an
    /// `error` event and no worker is started.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Spawn`] if the worker thread cannot be started.
    pub fn start_search(
        &mut self,
        start: String,
        target: String,
        hints: Vec<Hint>,
        max_depth: Option<u32>,
    ) -> Result<(), HostError> {
        self.discard_active();

        let engine = match self.build_engine(start, target, hints, max_depth) {
            Ok(engine) => engine,
            Err(e) => {
                error!("search rejected: {e}");
                self.emit(Event::Error {
                    error: e.to_string(),
                });
                return Ok(());
            }
        };

        let id = self.next_id;
        self.next_id += 1;
        let cancel = CancellationToken::new();
        let discard = CancellationToken::new();
        let worker = Worker {
            id,
            engine,
            cancel: cancel.clone(),
            discard: discard.clone(),
            events: self.events.clone(),
        };
        let handle = thread::Builder::new()
            .name(format!("tanuki-search-{id}"))
            .spawn(move || worker.run())
            .map_err(|e| HostError::Spawn {
                detail: e.to_string(),
            })?;
        debug!("search {id}: worker started");
        self.active = Some(ActiveSearch {
            id,
            cancel,
            discard,
            handle,
        });
        Ok(())
    }

    /// Answer a `search` request that could not be decoded.
    ///
    /// Like any new search, it supersedes the live one; the caller then gets
    /// a single `error` event.
    pub fn reject_search(&mut self, error: String) {
        self.discard_active();
        warn!("search rejected: {error}");
        self.emit(Event::Error { error });
    }

    /// Request cancellation of the live search.
    ///
    /// The worker answers with a `cancelled` event at its next yield point.
    pub fn cancel(&mut self) {
        match &self.active {
            Some(active) if !active.handle.is_finished() => {
                debug!("search {}: cancel requested", active.id);
                active.cancel.cancel();
            }
            _ => warn!("cancel: no active search"),
        }
    }

    /// Whether a worker is still running.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.handle.is_finished())
    }

    /// Whether `init` has run.
    #[must_use]
    pub fn is_accelerated(&self) -> bool {
        self.accelerated
    }

    /// Block until the live search (if any) has emitted its terminal event.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::WorkerPanicked`] if the worker thread died.
    pub fn wait(&mut self) -> Result<(), HostError> {
        match self.active.take() {
            Some(active) => active.handle.join().map_err(|_| HostError::WorkerPanicked),
            None => Ok(()),
        }
    }

    fn build_engine(
        &self,
        start: String,
        target: String,
        hints: Vec<Hint>,
        max_depth: Option<u32>,
    ) -> Result<SearchEngine, SearchError> {
        if hints.is_empty() {
            return Err(SearchError::EmptyHintSet);
        }
        let catalog = HintCatalog::new(hints)?;
        match catalog.digest() {
            Ok(digest) => debug!("hint catalog {digest} ({} hints)", catalog.len()),
            Err(e) => warn!("hint catalog digest unavailable: {e}"),
        }
        let mut policy = self.config.policy_for(max_depth);
        if self.accelerated {
            policy.backend = BackendKind::Buffered;
        }
        SearchEngine::new(start, target, catalog, policy)
    }

    /// Silence and stop the live worker, then join it.
    fn discard_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        active.discard.cancel();
        active.cancel.cancel();
        if active.handle.join().is_err() {
            error!("search {}: worker thread panicked", active.id);
        } else {
            debug!("search {}: discarded", active.id);
        }
    }

    fn emit(&self, event: Event) {
        if self.events.send(event).is_err() {
            debug!("event receiver dropped");
        }
    }
}

impl Drop for SearchHost {
    fn drop(&mut self) {
        self.discard_active();
    }
}

impl std::fmt::Debug for SearchHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHost")
            .field("config", &self.config)
            .field("accelerated", &self.accelerated)
            .field("active", &self.active.as_ref().map(|a| a.id))
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

/// Everything a worker thread owns.
struct Worker {
    id: u64,
    engine: SearchEngine,
    cancel: CancellationToken,
    discard: CancellationToken,
    events: Sender<Event>,
}

impl Worker {
    /// Run the engine and emit progress plus exactly one terminal event,
    /// unless discarded.
    fn run(mut self) {
        let Self {
            id,
            engine,
            cancel,
            discard,
            events,
        } = &mut self;
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let mut sink = |progress: &Progress| {
                if !discard.is_cancelled() && events.send(Event::from(progress)).is_err() {
                    debug!("search {id}: progress receiver dropped");
                }
            };
            engine.run(cancel, &mut sink)
        }));

        if discard.is_cancelled() {
            debug!("search {id}: superseded, events suppressed");
            return;
        }

        let event = match outcome {
            Ok(Ok(report)) => {
                info!(
                    "search {id}: finished after {} states ({:?})",
                    report.stats.states_explored, report.stats
                );
                Event::from(report)
            }
            Ok(Err(e)) => {
                error!("search {id}: {e}");
                Event::not_found(engine.best_attempts().to_vec())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("search {id}: worker panicked: {message}");
                Event::Error {
                    error: format!("search worker panicked: {message}"),
                }
            }
        };
        if events.send(event).is_err() {
            debug!("search {id}: event receiver dropped");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}
