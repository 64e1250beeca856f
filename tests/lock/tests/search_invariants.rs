//! Invariant locks checked after every engine step.

use std::collections::HashSet;

use lock_tests::fixture_catalog::{letter_removers, standard_catalog};
use tanuki_search::distance::{BackendKind, DistanceEstimator, DistanceWeights};
use tanuki_search::policy::SearchPolicy;
use tanuki_search::search::{SearchEngine, SearchOutcome, Step};

/// Drive `engine` to completion, checking invariants after each step.
fn drive(engine: &mut SearchEngine) -> SearchOutcome {
    let max_depth = engine.policy().max_depth;
    let limit = engine.policy().best_attempts_limit;
    let mut dequeued = HashSet::new();
    loop {
        match engine.step().unwrap() {
            Step::Expanded { text, depth, .. } | Step::Pruned { text, depth } => {
                assert!(depth <= max_depth, "{text:?} dequeued at depth {depth}");
                assert!(dequeued.insert(text.clone()), "{text:?} dequeued twice");
            }
            Step::Finished(outcome) => return outcome,
        }
        let attempts = engine.best_attempts();
        assert!(attempts.len() <= limit);
        assert!(attempts.windows(2).all(|w| w[0].distance <= w[1].distance));
        let texts: HashSet<&str> = attempts.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts.len(), attempts.len(), "duplicate text in best attempts");
        assert!(attempts.iter().all(|a| a.path.len() <= max_depth as usize));
    }
}

#[test]
fn invariants_hold_on_exhaustive_run() {
    let mut engine = SearchEngine::new(
        "abcdefg",
        "xyz",
        letter_removers("abcdefg"),
        SearchPolicy::default().with_max_depth(4),
    )
    .unwrap();
    let outcome = drive(&mut engine);
    assert!(matches!(outcome, SearchOutcome::Exhausted { .. }));
    let stats = engine.stats();
    assert!(stats.depth_pruned > 0);
    assert!(stats.duplicates_suppressed > 0);
    assert!(stats.max_depth_reached <= 4);
}

#[test]
fn invariants_hold_with_small_attempt_limit() {
    let policy = SearchPolicy {
        best_attempts_limit: 3,
        ..SearchPolicy::default().with_max_depth(3)
    };
    let mut engine =
        SearchEngine::new("たぬきけしごむ", "きつね", standard_catalog(), policy).unwrap();
    let outcome = drive(&mut engine);
    assert_eq!(outcome.best_attempts().len(), 3);
}

#[test]
fn invariants_hold_with_compound_moves() {
    let policy = SearchPolicy {
        compound_moves: true,
        ..SearchPolicy::default().with_max_depth(2)
    };
    let mut engine =
        SearchEngine::new("abcdef", "q", letter_removers("abcdef"), policy).unwrap();
    drive(&mut engine);
}

#[test]
fn every_visited_text_counted_once() {
    let mut engine = SearchEngine::new(
        "aabbcc",
        "z",
        letter_removers("abc"),
        SearchPolicy::default(),
    )
    .unwrap();
    drive(&mut engine);
    // Subsets of {a, b, c} removed: 2^3 distinct texts, including the start.
    assert_eq!(engine.stats().states_explored, 8);
    assert_eq!(engine.stats().states_enqueued, 8);
}

#[test]
fn heuristic_properties_across_backends() {
    let samples = ["たぬき", "ぬき", "けたぬごむき", "はみがき", "きがき", "a", "abcabc"];
    for kind in [BackendKind::Scalar, BackendKind::Buffered] {
        let mut est = DistanceEstimator::new(DistanceWeights::default(), kind.build(), 100);
        for a in samples {
            assert!(est.heuristic(a, a).abs() < f64::EPSILON);
            for b in samples {
                let ab = est.heuristic(a, b);
                assert!(ab >= 0.0);
                assert!((ab - est.heuristic(b, a)).abs() < 1e-9);
                if a != b {
                    assert!(ab > 0.0);
                }
            }
        }
    }
}

#[test]
fn backends_produce_identical_runs() {
    let run = |backend: BackendKind| {
        let policy = SearchPolicy {
            backend,
            ..SearchPolicy::default().with_max_depth(3)
        };
        let mut engine =
            SearchEngine::new("たぬきけしごむ", "きつね", standard_catalog(), policy).unwrap();
        let outcome = drive(&mut engine);
        (outcome, engine.stats())
    };
    assert_eq!(run(BackendKind::Scalar), run(BackendKind::Buffered));
}

#[test]
fn cancel_mid_run_keeps_attempts() {
    let mut engine = SearchEngine::new(
        "abcdefghij",
        "xyz",
        letter_removers("abcdefghij"),
        SearchPolicy::default(),
    )
    .unwrap();
    for _ in 0..10 {
        assert!(!matches!(engine.step().unwrap(), Step::Finished(_)));
    }
    let outcome = engine.cancel();
    let SearchOutcome::Cancelled { best_attempts } = outcome else {
        panic!("expected Cancelled");
    };
    assert!(!best_attempts.is_empty());
    assert_eq!(engine.stats().states_explored, 10);
}
