//! Installation domain events - maps to the install crate

use serde::{Deserialize, Serialize};
use stagehand_types::UpdateScope;
use std::path::PathBuf;
use std::time::Duration;

/// The two ordered version checkpoints bracketing the destructive portion of
/// a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallCheckpoint {
    Started,
    Finished,
}

/// Installation domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InstallEvent {
    /// Install run started
    Started {
        identifier: String,
        direct_staging: bool,
        voice_only: bool,
    },

    /// Update scope determined from the version-state snapshot
    ScopeDetermined { scope: UpdateScope },

    /// Download phase delegated to the downloader collaborator
    DownloadStarted,

    /// Download phase finished
    DownloadCompleted,

    /// Extraction phase delegated to the extractor collaborator
    ExtractionStarted { destination: PathBuf },

    /// Extraction phase finished
    ExtractionCompleted,

    /// Shared asset renamed to its backup name
    BackupCreated { path: PathBuf },

    /// Staged move into the live tree started
    MoveStarted { from: PathBuf, to: PathBuf },

    /// Staged move finished
    MoveCompleted { files_moved: usize },

    /// A version checkpoint was recorded by the version-state collaborator
    CheckpointRecorded { checkpoint: InstallCheckpoint },

    /// Install run completed successfully
    Completed { duration: Duration },

    /// Install run failed
    Failed { phase: String, error: String },
}
