//! Cross-process determinism for the canonical search.
//!
//! Spawns the `search_fixture` binary with each distance backend and asserts
//! both produce identical output that also matches an in-process run.

use std::process::Command;

use lock_tests::fixture_catalog::{
    canonical_policy, standard_catalog, CANONICAL_START, CANONICAL_TARGET,
};
use tanuki_search::search::find_path;

fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("search_fixture");
    path.to_string_lossy().to_string()
}

fn run_backend(backend: &str) -> String {
    let bin = binary_path();
    let output = Command::new(&bin)
        .arg(backend)
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn {bin} (backend={backend}): {e}"));

    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

fn value_of<'a>(output: &'a str, key: &str) -> &'a str {
    output
        .lines()
        .find_map(|line| line.strip_prefix(key).and_then(|rest| rest.strip_prefix('=')))
        .unwrap_or_else(|| panic!("output missing {key}"))
}

#[test]
fn crossproc_backends_agree() {
    let scalar = run_backend("scalar");
    assert!(
        scalar.contains("catalog_digest=sha256:"),
        "scalar output missing catalog_digest"
    );
    assert_eq!(value_of(&scalar, "found"), "true");

    assert_eq!(scalar, run_backend("buffered"), "backends diverged");
    assert_eq!(scalar, run_backend("scalar"), "repeat run diverged");
}

#[test]
fn crossproc_matches_inproc() {
    let output = run_backend("scalar");
    let catalog = standard_catalog();
    let report =
        find_path(CANONICAL_START, CANONICAL_TARGET, &catalog, &canonical_policy()).unwrap();

    assert_eq!(
        value_of(&output, "catalog_digest"),
        catalog.digest().unwrap().to_string()
    );
    assert_eq!(
        value_of(&output, "path"),
        report.outcome.path().unwrap().join(",")
    );
    assert_eq!(
        value_of(&output, "states_explored"),
        report.stats.states_explored.to_string()
    );
    assert_eq!(
        value_of(&output, "states_enqueued"),
        report.stats.states_enqueued.to_string()
    );
}
