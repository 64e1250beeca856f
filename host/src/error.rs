//! Host and protocol errors.

/// A command line could not be decoded, or an event could not be encoded.
#[derive(Debug)]
pub struct ProtocolError {
    source: serde_json::Error,
}

impl From<serde_json::Error> for ProtocolError {
    fn from(source: serde_json::Error) -> Self {
        Self { source }
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed message: {}", self.source)
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Failure of the host itself (not of a search).
#[derive(Debug)]
pub enum HostError {
    /// Message encoding/decoding failed.
    Protocol(ProtocolError),
    /// The worker thread could not be started.
    Spawn { detail: String },
    /// A worker thread panicked outside the engine's panic guard.
    WorkerPanicked,
}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Protocol(e) => write!(f, "{e}"),
            Self::Spawn { detail } => write!(f, "failed to spawn search worker: {detail}"),
            Self::WorkerPanicked => write!(f, "search worker panicked"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Protocol(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProtocolError> for HostError {
    fn from(e: ProtocolError) -> Self {
        Self::Protocol(e)
    }
}
