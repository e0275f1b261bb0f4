use serde::{Deserialize, Serialize};

use crate::{EventLevel, EventMeta};

// Declare all domain modules
pub mod general;
pub mod install;
pub mod progress;

// Re-export all domain events
pub use general::*;
pub use install::*;
pub use progress::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (warnings, errors, operations)
    General(GeneralEvent),

    /// Installation lifecycle events
    Install(InstallEvent),

    /// Coarse progress milestones
    Progress(ProgressEvent),
}

impl AppEvent {
    /// Default logging level for this event (used for metadata/routing).
    #[must_use]
    pub fn event_level(&self) -> EventLevel {
        match self {
            Self::General(GeneralEvent::Warning { .. }) => EventLevel::Warn,
            Self::General(GeneralEvent::Error { .. } | GeneralEvent::OperationFailed { .. }) => {
                EventLevel::Error
            }
            Self::General(GeneralEvent::DebugLog { .. }) => EventLevel::Debug,
            Self::Install(InstallEvent::Failed { .. }) => EventLevel::Error,
            _ => EventLevel::Info,
        }
    }

    /// Build emission metadata for this event at its default level.
    #[must_use]
    pub fn meta(&self) -> EventMeta {
        EventMeta::new(self.event_level())
    }
}
