//! Typed search errors.
//!
//! `SearchError` represents construction failures (returned before any
//! frontier work begins) and the defensive replay failure. Cancellation is
//! not an error: it is a terminal [`crate::search::SearchOutcome`].

use tanuki_kernel::hints::catalog::CatalogError;
use tanuki_kernel::operators::apply::ApplyFailure;

/// Typed failure for search construction and path replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The start string is empty.
    EmptyStart,
    /// The target string is empty.
    EmptyTarget,
    /// No hints were supplied.
    EmptyHintSet,
    /// The supplied hints do not form a valid catalog.
    InvalidHints(CatalogError),
    /// A policy option is out of range.
    InvalidPolicy { detail: String },
    /// Replaying a found path through the catalog failed.
    Replay(ApplyFailure),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyStart => write!(f, "start string is empty"),
            Self::EmptyTarget => write!(f, "target string is empty"),
            Self::EmptyHintSet => write!(f, "hint set is empty"),
            Self::InvalidHints(e) => write!(f, "invalid hint set: {e}"),
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::Replay(e) => write!(f, "path replay failed: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidHints(e) => Some(e),
            Self::Replay(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CatalogError> for SearchError {
    fn from(e: CatalogError) -> Self {
        Self::InvalidHints(e)
    }
}

impl From<ApplyFailure> for SearchError {
    fn from(e: ApplyFailure) -> Self {
        Self::Replay(e)
    }
}
