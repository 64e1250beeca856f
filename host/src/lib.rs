//! Tanuki Host: runs search engines off the caller's thread.
//!
//! The host accepts three commands (`init`, `search`, `cancel`) and emits
//! events (`initialized`, `progress`, `result`, `cancelled`, `error`) over a
//! channel. At most one search is live per host; starting a new one
//! discards the previous worker first.
//!
//! The only state crossing the thread boundary is the cancellation flag and
//! the event payloads, which are moved through the channel.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod protocol;
