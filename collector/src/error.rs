use std::path::PathBuf;

use thiserror::Error;

use crate::source::Probe;

/// A single probe could not be read.
///
/// Never escapes [`crate::SignalCollector::collect`]: the collector swaps
/// the probe's value for its "unknown" sentinel and moves on.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe {probe} unavailable: {reason}")]
    Unavailable { probe: Probe, reason: String },
}

impl ProbeError {
    pub fn unavailable(probe: Probe, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            probe,
            reason: reason.into(),
        }
    }

    pub fn probe(&self) -> Probe {
        match self {
            Self::Unavailable { probe, .. } => *probe,
        }
    }
}

/// Errors loading a probe snapshot reported by a remote client.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read probe snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse probe snapshot: {source}")]
    Parse { source: serde_json::Error },
}
