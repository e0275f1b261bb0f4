//! Coarse progress milestones for status reporting

use serde::{Deserialize, Serialize};

/// Observational status updates at coarse milestones; no effect on control
/// flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProgressEvent {
    /// A named milestone was reached
    Milestone { percent: u8, message: String },
}

impl ProgressEvent {
    /// Milestone with the percent clamped into the 0-100 contract.
    #[must_use]
    pub fn milestone(percent: u8, message: impl Into<String>) -> Self {
        Self::Milestone {
            percent: percent.min(100),
            message: message.into(),
        }
    }
}
