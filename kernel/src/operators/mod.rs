//! Operators module: applying named hints to strings.
//!
//! Depends on `hints`.

pub mod apply;
