//! Single source of truth for the lock-test hint catalog and canonical search.
//!
//! Used by both the `search_fixture` binary and the in-process tests, so the
//! cross-process output and the in-process expectations cannot drift apart.

use tanuki_kernel::hints::catalog::HintCatalog;
use tanuki_kernel::hints::operation::Hint;
use tanuki_search::policy::SearchPolicy;

/// The fifteen-hint word-play catalog, as JSON.
pub const HINTS_JSON: &str = include_str!("../fixtures/hints.json");

/// Start of the canonical search: needs `けしごむ`, `たぬき` and one `け` remover.
pub const CANONICAL_START: &str = "けたぬごむき";

/// Target of the canonical search.
pub const CANONICAL_TARGET: &str = "ぬき";

/// Depth cutoff of the canonical search.
pub const CANONICAL_MAX_DEPTH: u32 = 5;

/// Parse [`HINTS_JSON`].
///
/// # Panics
///
/// Panics if the checked-in fixture is malformed (a fixture bug, not a
/// usage error).
#[must_use]
pub fn standard_catalog() -> HintCatalog {
    HintCatalog::from_json(HINTS_JSON.as_bytes()).expect("fixtures/hints.json is a valid catalog")
}

/// Policy of the canonical search.
#[must_use]
pub fn canonical_policy() -> SearchPolicy {
    SearchPolicy::default().with_max_depth(CANONICAL_MAX_DEPTH)
}

/// Catalog of single-letter `Remove` hints named after their letter.
///
/// # Panics
///
/// Panics if `letters` repeats a character.
#[must_use]
pub fn letter_removers(letters: &str) -> HintCatalog {
    let hints = letters
        .chars()
        .map(|c| Hint::remove(c.to_string(), c.to_string()))
        .collect();
    HintCatalog::new(hints).expect("letters are distinct")
}
