//! Binary that runs the canonical search and prints deterministic output
//! lines for cross-process verification.
//!
//! Usage: `search_fixture [scalar|buffered]`
//!
//! Output: key=value lines (see source for format).

use lock_tests::fixture_catalog::{
    canonical_policy, standard_catalog, CANONICAL_START, CANONICAL_TARGET,
};
use tanuki_search::distance::BackendKind;
use tanuki_search::policy::SearchPolicy;
use tanuki_search::search::find_path;

fn main() {
    let backend = match std::env::args().nth(1).as_deref() {
        Some("buffered") => BackendKind::Buffered,
        _ => BackendKind::Scalar,
    };
    let catalog = standard_catalog();
    let policy = SearchPolicy {
        backend,
        ..canonical_policy()
    };
    let report =
        find_path(CANONICAL_START, CANONICAL_TARGET, &catalog, &policy).expect("search failed");
    let digest = catalog.digest().expect("catalog digest");

    let path = report.outcome.path().unwrap_or_default().join(",");
    let first_attempt = report
        .outcome
        .best_attempts()
        .first()
        .map(|a| format!("{}@{:.3}", a.text, a.distance))
        .unwrap_or_default();

    println!("catalog_digest={digest}");
    println!("found={}", report.outcome.is_found());
    println!("path={path}");
    println!("states_explored={}", report.stats.states_explored);
    println!("states_enqueued={}", report.stats.states_enqueued);
    println!("duplicates_suppressed={}", report.stats.duplicates_suppressed);
    println!("frontier_high_water={}", report.stats.frontier_high_water);
    println!("best_attempt_count={}", report.outcome.best_attempts().len());
    println!("best_attempt={first_attempt}");
}
