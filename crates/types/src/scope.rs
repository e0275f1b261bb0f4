//! Full-vs-partial update scoping

use serde::{Deserialize, Serialize};

/// Scope of an update run, derived once from the version-state snapshot
/// before any destructive action.
///
/// A full update replaces the entire data set and warrants purging the
/// large legacy image caches; a partial update must leave them intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateScope {
    Full,
    Partial,
}

impl UpdateScope {
    /// Derive the scope from the version-state collaborator's answer.
    #[must_use]
    pub fn from_full_flag(full: bool) -> Self {
        if full {
            Self::Full
        } else {
            Self::Partial
        }
    }

    #[must_use]
    pub fn is_full(self) -> bool {
        matches!(self, Self::Full)
    }
}
