//! Shared helpers for tanuki benchmark suites.

use tanuki_kernel::hints::catalog::HintCatalog;
use tanuki_kernel::hints::operation::Hint;
use tanuki_search::policy::SearchPolicy;

/// The word-play catalog shared with the lock tests.
const HINTS_JSON: &str = include_str!("../../tests/lock/fixtures/hints.json");

/// Start text of the canonical three-hop search.
pub const CANONICAL_START: &str = "けたぬごむき";

/// Target text of the canonical three-hop search.
pub const CANONICAL_TARGET: &str = "ぬき";

/// Text pairs used by the distance benchmarks, short to long.
pub const DISTANCE_PAIRS: [(&str, &str); 4] = [
    ("たぬき", "ぬき"),
    ("けたぬごむき", "ぬき"),
    ("たぬきけしごむはみがき", "きつねのよめいり"),
    (
        "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz",
        "zyxwvutsrqponmlkjihgfedcbazyxwvutsrqponmlkjihgfedcba",
    ),
];

/// Parse the shared word-play catalog.
///
/// # Panics
///
/// Panics if the checked-in fixture is malformed. Benchmark setup failures are fatal.
#[must_use]
pub fn standard_catalog() -> HintCatalog {
    HintCatalog::from_json(HINTS_JSON.as_bytes()).expect("hints fixture parses")
}

/// One `Remove` hint per letter, named after the letter.
///
/// The search space over `letters` is every subset of them, which makes the
/// catalog a convenient knob for frontier width.
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

/// Default policy with `max_depth` overridden.
#[must_use]
pub fn policy_with_depth(max_depth: u32) -> SearchPolicy {
    SearchPolicy::default().with_max_depth(max_depth)
}
