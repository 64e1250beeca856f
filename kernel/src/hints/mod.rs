//! Hints module: the hint operation model and the catalog that names them.
//!
//! Does not import from `operators`.

pub mod catalog;
pub mod operation;
