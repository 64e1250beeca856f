//! Host protocol locks: command handling, event ordering, cancellation,
//! and superseded searches.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use lock_tests::fixture_catalog::{
    letter_removers, standard_catalog, CANONICAL_START, CANONICAL_TARGET,
};
use tanuki_host::config::HostConfig;
use tanuki_host::host::SearchHost;
use tanuki_host::protocol::{encode_event, parse_command, Command, Event};
use tanuki_kernel::hints::operation::Hint;
use tanuki_search::policy::SearchPolicy;

const TIMEOUT: Duration = Duration::from_secs(60);

/// Letters for a search space far too large to finish before a cancel lands.
const WIDE: &str = "abcdefghijklmnopqrst";

fn wide_search() -> Command {
    Command::Search {
        start: WIDE.into(),
        target: "xyz".into(),
        hints: letter_removers(WIDE).list_all().to_vec(),
        max_depth: Some(20),
    }
}

fn canonical_search() -> Command {
    Command::Search {
        start: CANONICAL_START.into(),
        target: CANONICAL_TARGET.into(),
        hints: standard_catalog().list_all().to_vec(),
        max_depth: Some(5),
    }
}

fn until_terminal(rx: &Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    loop {
        let event = rx.recv_timeout(TIMEOUT).expect("event before timeout");
        let done = event.is_terminal();
        events.push(event);
        if done {
            return events;
        }
    }
}

fn fast_progress() -> HostConfig {
    HostConfig {
        policy: SearchPolicy {
            batch_size: 10,
            progress_interval: Duration::ZERO,
            ..SearchPolicy::default()
        },
    }
}

#[test]
fn search_emits_progress_then_one_result() {
    let (mut host, rx) = SearchHost::new(fast_progress());
    host.handle(canonical_search()).unwrap();
    host.wait().unwrap();
    drop(host);

    let events: Vec<Event> = rx.iter().collect();
    let terminal: Vec<&Event> = events.iter().filter(|e| e.is_terminal()).collect();
    assert_eq!(terminal.len(), 1);
    assert!(events.last().unwrap().is_terminal());
    let Event::Result {
        found, path, steps, ..
    } = events.last().unwrap()
    else {
        panic!("expected result, got {:?}", events.last());
    };
    assert!(*found);
    assert_eq!(path.as_ref().unwrap().len() + 1, steps.as_ref().unwrap().len());

    let counts: Vec<u64> = events
        .iter()
        .filter_map(|e| match e {
            Event::Progress { progress, .. } => Some(*progress),
            _ => None,
        })
        .collect();
    assert!(counts.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn cancel_yields_cancelled_event() {
    let (mut host, rx) = SearchHost::new(fast_progress());
    host.handle(wide_search()).unwrap();
    // Wait for the first progress so at least one state has been dequeued.
    loop {
        if let Event::Progress { .. } = rx.recv_timeout(TIMEOUT).unwrap() {
            break;
        }
    }
    host.handle(Command::Cancel).unwrap();
    let events = until_terminal(&rx);
    let Some(Event::Cancelled { best_attempts }) = events.last() else {
        panic!("expected cancelled, got {:?}", events.last());
    };
    assert!(!best_attempts.is_empty());
    assert!(best_attempts.len() <= 30);
    host.wait().unwrap();
    assert!(!host.is_searching());
}

#[test]
fn new_search_discards_previous_silently() {
    let (mut host, rx) = SearchHost::new(HostConfig::default());
    host.handle(wide_search()).unwrap();
    host.handle(canonical_search()).unwrap();
    host.wait().unwrap();
    drop(host);

    let terminal: Vec<Event> = rx.iter().filter(Event::is_terminal).collect();
    assert_eq!(terminal.len(), 1, "only the second search reports: {terminal:?}");
    assert!(matches!(terminal[0], Event::Result { found: true, .. }));
}

#[test]
fn construction_failures_are_error_events() {
    let (mut host, rx) = SearchHost::new(HostConfig::default());
    let bad = [
        Command::Search {
            start: String::new(),
            target: "ぬき".into(),
            hints: vec![Hint::remove("たぬき", "た")],
            max_depth: None,
        },
        Command::Search {
            start: "たぬき".into(),
            target: "ぬき".into(),
            hints: Vec::new(),
            max_depth: None,
        },
        Command::Search {
            start: "たぬき".into(),
            target: "ぬき".into(),
            hints: vec![Hint::remove("たぬき", "")],
            max_depth: None,
        },
    ];
    for command in bad {
        host.handle(command).unwrap();
        assert!(matches!(
            rx.recv_timeout(TIMEOUT).unwrap(),
            Event::Error { .. }
        ));
        assert!(!host.is_searching());
    }
}

#[test]
fn json_commands_drive_the_host() {
    let (mut host, rx) = SearchHost::new(HostConfig::default());
    let lines = [
        r#"{"type":"init"}"#,
        r#"{"type":"search","start":"はみがき","target":"きがき","maxDepth":3,
            "hints":[{"name":"はみがき","operation":{"type":"replace","target":"はみ","replacement":"き"}}]}"#,
    ];
    for line in lines {
        host.handle(parse_command(line).unwrap()).unwrap();
    }
    assert_eq!(rx.recv_timeout(TIMEOUT).unwrap(), Event::Initialized);
    let events = until_terminal(&rx);
    let Some(Event::Result {
        found: true,
        path: Some(path),
        steps: Some(steps),
        best_attempts: Some(attempts),
    }) = events.last()
    else {
        panic!("expected found result, got {:?}", events.last());
    };
    assert_eq!(path, &["はみがき"]);
    assert_eq!(steps, &["はみがき", "きがき"]);
    assert_eq!(attempts[0].text, "きがき");
    assert!(host.is_accelerated());
}

#[test]
fn unreachable_search_reports_attempts_within_depth() {
    let (mut host, rx) = SearchHost::new(HostConfig::default());
    host.handle(Command::Search {
        start: "またぬき".into(),
        target: "ぬき".into(),
        hints: standard_catalog().list_all().to_vec(),
        max_depth: Some(1),
    })
    .unwrap();
    let events = until_terminal(&rx);
    let Some(Event::Result {
        found: false,
        best_attempts: Some(attempts),
        ..
    }) = events.last()
    else {
        panic!("expected not-found result, got {:?}", events.last());
    };
    assert!(!attempts.is_empty());
    assert!(attempts.iter().all(|a| a.path.len() <= 1));
}

#[test]
fn unreachable_result_wire_shape() {
    let (mut host, rx) = SearchHost::new(HostConfig::default());
    host.handle(Command::Search {
        start: "またぬき".into(),
        target: "ぬき".into(),
        hints: standard_catalog().list_all().to_vec(),
        max_depth: Some(1),
    })
    .unwrap();
    let events = until_terminal(&rx);
    let line = encode_event(events.last().unwrap()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&line).unwrap();

    assert_eq!(json["type"], "result");
    assert_eq!(json["found"], false);
    assert!(json.get("path").is_none());
    let attempts = json["bestAttempts"].as_array().unwrap();
    assert!(!attempts.is_empty());
    for attempt in attempts {
        assert!(attempt["text"].is_string());
        assert!(attempt["path"].is_array());
        assert!(attempt["distance"].as_f64().unwrap() > 0.0);
    }
}
