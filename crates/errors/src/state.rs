//! Version-state collaborator error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("version snapshot unavailable: {message}")]
    SnapshotUnavailable { message: String },

    #[error("checkpoint write failed: {checkpoint}: {message}")]
    CheckpointFailed { checkpoint: String, message: String },

    #[error("state corrupted: {message}")]
    StateCorrupted { message: String },
}
