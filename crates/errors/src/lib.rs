#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for the stagehand update engine
//!
//! This crate provides fine-grained error types organized by domain.
//! All error types implement Clone where possible for easier handling.

use thiserror::Error;

pub mod install;
pub mod state;
pub mod storage;

// Re-export all error types at the root
pub use install::InstallError;
pub use state::StateError;
pub use storage::StorageError;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("state error: {0}")]
    State(#[from] StateError),

    #[error("install error: {0}")]
    Install(#[from] InstallError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {message}")]
    Io {
        message: String,
        path: Option<std::path::PathBuf>,
    },
}

/// How severely an error affects an in-flight run.
///
/// The orchestrator checks severity at every best-effort call site: `Fatal`
/// aborts the run, `Warning` is reported and the run continues, `Ignorable`
/// is swallowed outright (at most a debug event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Abort the run and surface the failing path to the caller.
    Fatal,
    /// Report and continue; the installed content is still correct.
    Warning,
    /// Swallow; leftover temp state only, no impact on installed content.
    Ignorable,
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an Io error with an associated path
    pub fn io_with_path(err: &std::io::Error, path: impl Into<std::path::PathBuf>) -> Self {
        Self::Io {
            message: err.to_string(),
            path: Some(path.into()),
        }
    }

    /// Classify this error for the best-effort call sites.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Install(err) => err.severity(),
            _ => Severity::Fatal,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
        }
    }
}
