//! Tanuki Kernel: the hint model and the single string-rewrite primitive.
//!
//! # API Surface
//!
//! - [`hints::catalog::HintCatalog`] -- the named hint set (`lookup`, `list_all`)
//! - [`operators::apply::apply_hint`] -- apply one named hint to a string
//! - [`operators::apply::decode`] -- apply an ordered list of hints
//! - [`operators::apply::replay`] -- apply a path and keep every intermediate string
//!
//! # Module Dependency Direction
//!
//! `hints` ← `operators`, `hints` ← `digest`
//!
//! One-way only. No cycles. The kernel knows nothing about search.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod digest;
pub mod hints;
pub mod operators;
