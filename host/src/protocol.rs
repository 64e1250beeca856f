//! JSON message protocol between caller and host.
//!
//! In:
//! - `{"type":"init"}`
//! - `{"type":"search","start":..,"target":..,"hints":[..],"maxDepth":..}`
//! - `{"type":"cancel"}`
//!
//! Out:
//! - `{"type":"initialized"}`
//! - `{"type":"progress","progress":n,"currentBest":{text,path,distance}?}`
//! - `{"type":"result","found":b,"path":[..]?,"steps":[..]?,"bestAttempts":[..]?}`
//! - `{"type":"cancelled","bestAttempts":[..]}`
//! - `{"type":"error","error":".."}`

use serde::{Deserialize, Serialize};
use tanuki_kernel::hints::operation::Hint;
use tanuki_search::attempts::BestAttempt;
use tanuki_search::progress::Progress;
use tanuki_search::search::{SearchOutcome, SearchReport};

use crate::error::ProtocolError;

/// A command from the caller.
///
/// Missing `search` fields decode as empty and are rejected by engine
/// construction, so the caller gets an `error` event instead of a silent drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    Init,
    Search {
        #[serde(default)]
        start: String,
        #[serde(default)]
        target: String,
        #[serde(default)]
        hints: Vec<Hint>,
        #[serde(rename = "maxDepth", default, skip_serializing_if = "Option::is_none")]
        max_depth: Option<u32>,
    },
    Cancel,
}

/// An event emitted by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    Initialized,
    Progress {
        progress: u64,
        #[serde(rename = "currentBest", default, skip_serializing_if = "Option::is_none")]
        current_best: Option<BestAttempt>,
    },
    Result {
        found: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        steps: Option<Vec<String>>,
        #[serde(rename = "bestAttempts", default, skip_serializing_if = "Option::is_none")]
        best_attempts: Option<Vec<BestAttempt>>,
    },
    Cancelled {
        #[serde(rename = "bestAttempts")]
        best_attempts: Vec<BestAttempt>,
    },
    Error {
        error: String,
    },
}

impl Event {
    /// `result{found:false}` carrying `best_attempts`.
    #[must_use]
    pub fn not_found(best_attempts: Vec<BestAttempt>) -> Self {
        Self::Result {
            found: false,
            path: None,
            steps: None,
            best_attempts: Some(best_attempts),
        }
    }

    /// Whether this event ends a search (`result`, `cancelled`, `error`).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Result { .. } | Self::Cancelled { .. } | Self::Error { .. }
        )
    }
}

impl From<&Progress> for Event {
    fn from(progress: &Progress) -> Self {
        Self::Progress {
            progress: progress.states_explored,
            current_best: progress.current_best.clone(),
        }
    }
}

impl From<SearchOutcome> for Event {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Found {
                path,
                steps,
                best_attempts,
            } => Self::Result {
                found: true,
                path: Some(path),
                steps: Some(steps),
                best_attempts: Some(best_attempts),
            },
            SearchOutcome::Exhausted { best_attempts } => Self::not_found(best_attempts),
            SearchOutcome::Cancelled { best_attempts } => Self::Cancelled { best_attempts },
        }
    }
}

impl From<SearchReport> for Event {
    fn from(report: SearchReport) -> Self {
        report.outcome.into()
    }
}

/// Decode one command line.
///
/// # Errors
///
/// Returns [`ProtocolError`] if `line` is not a valid command object.
pub fn parse_command(line: &str) -> Result<Command, ProtocolError> {
    Ok(serde_json::from_str(line)?)
}

/// Whether `line` is a JSON object tagged `"type":"search"`, decodable or not.
///
/// A search request that fails to decode still owes the caller a terminal
/// event; other malformed lines can be dropped.
#[must_use]
pub fn is_search_request(line: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(line)
        .is_ok_and(|value| value.get("type").and_then(serde_json::Value::as_str) == Some("search"))
}

/// Encode one event as a single JSON line (no trailing newline).
///
/// # Errors
///
/// Returns [`ProtocolError`] if serialization fails.
pub fn encode_event(event: &Event) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(event)?)
}
