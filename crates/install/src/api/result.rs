use stagehand_types::UpdateScope;
use std::time::Duration;

/// Result of a completed install run
#[derive(Debug, Clone)]
pub struct InstallResult {
    /// Scope the run was applied with
    pub scope: UpdateScope,
    /// Files moved by the staged merge (zero on the direct-staging variant)
    pub files_moved: usize,
    /// Wall-clock duration of the run
    pub duration: Duration,
}
