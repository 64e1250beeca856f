//! Tanuki Search: best-first search over string rewrites.
//!
//! This crate provides the search layer. It depends only on
//! `tanuki_kernel`; it does NOT depend on `tanuki_host`, knows nothing about
//! threads beyond an atomic cancellation flag, and performs no I/O.
//!
//! # Crate dependency graph
//!
//! ```text
//! tanuki_kernel  ←  tanuki_search  ←  tanuki_host
//! (hints, apply)    (engine, frontier)   (worker thread, protocol)
//! ```
//!
//! # Key types
//!
//! - [`search::SearchEngine`] -- one search run: `Idle → Running → {Found, Exhausted, Cancelled}`
//! - [`distance::DistanceEstimator`] -- cached composite heuristic with swappable backends
//! - [`frontier::BestFirstFrontier`] -- min-heap frontier plus per-run visited set
//! - [`attempts::BestAttempts`] -- bounded top-K of the closest states seen
//! - [`policy::SearchPolicy`] -- depth, batching, cache and weight configuration
//! - [`cancel::CancellationToken`] -- cooperative cancellation flag
//!
//! # Optimality
//!
//! Frontier priority is `g + h` with `g` the hop count and `h` the
//! composite distance. `h` is not admissible (a single hint can remove many
//! characters at once), so this is weighted best-first search: found paths
//! are usually short but not guaranteed shortest.

#![forbid(unsafe_code)]

pub mod attempts;
pub mod cache;
pub mod cancel;
pub mod distance;
pub mod error;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod progress;
pub mod search;
