//! Run events and the observers that receive them.
//!
//! Pipeline components never log run milestones directly; they hand events to
//! the `Reporter` they were constructed with.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::export::{ArtifactKind, ArtifactSummary};

#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// A provider fetch failed; emitted for every failure, including one that is not propagated
    FetchFailed {
        document: &'static str,
        error: String,
    },
    DatasetLoaded {
        dataset_key: String,
        clubs: usize,
        rounds: usize,
        matches: usize,
    },
    ArtifactWritten {
        kind: ArtifactKind,
        path: PathBuf,
        summary: ArtifactSummary,
    },
    ArtifactFailed {
        kind: ArtifactKind,
        error: String,
    },
}

pub trait Reporter: Send + Sync {
    fn report(&self, event: RunEvent);
}

pub type SharedReporter = Arc<dyn Reporter>;

/// Emits run events as `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    pub fn shared() -> SharedReporter {
        Arc::new(TracingReporter)
    }
}

impl Reporter for TracingReporter {
    fn report(&self, event: RunEvent) {
        match event {
            RunEvent::FetchFailed { document, error } => {
                warn!("Fetching {document} failed: {error}");
            }
            RunEvent::DatasetLoaded {
                dataset_key,
                clubs,
                rounds,
                matches,
            } => {
                info!(
                    "Loaded {}: {} clubs, {} rounds, {} matches",
                    dataset_key, clubs, rounds, matches
                );
            }
            RunEvent::ArtifactWritten {
                kind,
                path,
                summary,
            } => {
                info!(
                    "Saved {} data set ({} rows x {} columns) to {}",
                    kind,
                    summary.rows,
                    summary.columns,
                    path.display()
                );
            }
            RunEvent::ArtifactFailed { kind, error } => {
                error!("Failed to save {kind} data set: {error}");
            }
        }
    }
}
