//! Installation system error types

use crate::Severity;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstallError {
    #[error("installation failed: {message}")]
    Failed { message: String },

    #[error("download failed: {message}")]
    DownloadFailed { message: String },

    #[error("extraction failed: {message}")]
    ExtractionFailed { message: String },

    #[error("backup failed for {path}: {message}")]
    BackupFailed { path: String, message: String },

    #[error("filesystem operation failed: {operation} on {path}: {message}")]
    FilesystemError {
        operation: String,
        path: String,
        message: String,
    },

    #[error("legacy artifact purge failed for {path}: {message}")]
    LegacyPurgeFailed { path: String, message: String },

    #[error("staging cleanup failed for {path}: {message}")]
    CleanupFailed { path: String, message: String },

    #[error("staging directory missing: {path}")]
    StagingMissing { path: String },
}

impl InstallError {
    /// Severity of this error within an in-flight run.
    ///
    /// Legacy purges are optimization-only cleanup, so their failures are
    /// warnings. Post-install staging cleanup runs after content has landed,
    /// so its failures are ignorable. Everything else aborts the run.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::LegacyPurgeFailed { .. } => Severity::Warning,
            Self::CleanupFailed { .. } => Severity::Ignorable,
            _ => Severity::Fatal,
        }
    }
}
