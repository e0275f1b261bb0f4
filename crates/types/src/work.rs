//! Downloader/extractor work items

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One unit of the downloader/extractor work list: a source URL paired with
/// the staging path its archive is extracted into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    pub url: String,
    pub destination: PathBuf,
}

impl WorkItem {
    #[must_use]
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
        }
    }
}
