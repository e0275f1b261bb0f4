//! Collaborator interfaces consumed by the orchestrator
//!
//! The version-state snapshot and the downloader/extractor live outside this
//! crate; the orchestrator reaches them only through these traits.

use stagehand_errors::Error;
use stagehand_types::WorkItem;
use std::path::PathBuf;

/// Version-state collaborator
///
/// Must be queried before any destructive action and must reflect a
/// consistent snapshot for the duration of one run. The two checkpoint
/// recorders bracket the destructive portion of the run; `record_install_finished`
/// is only ever called after `record_install_started` succeeded.
pub trait VersionStore {
    /// Relative paths that need updating under the current snapshot
    fn files_requiring_update(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<PathBuf>, Error>> + Send;

    /// Whether the snapshot requires replacing the entire data set
    fn is_full_update_required(
        &self,
    ) -> impl std::future::Future<Output = Result<bool, Error>> + Send;

    /// Persist the "install started" checkpoint
    fn record_install_started(&self)
        -> impl std::future::Future<Output = Result<(), Error>> + Send;

    /// Persist the "install finished" checkpoint
    fn record_install_finished(
        &self,
    ) -> impl std::future::Future<Output = Result<(), Error>> + Send;
}

/// Downloader/extractor collaborator
///
/// Built by the caller from a work list of `WorkItem`s; both operations
/// block until the network/archive work completes and may fail on network
/// or archive errors. Any retry policy lives inside the implementation.
pub trait FetchPlan {
    /// The work list this plan was built from
    fn work_items(&self) -> &[WorkItem];

    /// Download every archive in the work list
    fn download(&mut self) -> impl std::future::Future<Output = Result<(), Error>> + Send;

    /// Extract every downloaded archive into its staging destination
    fn extract(&mut self) -> impl std::future::Future<Output = Result<(), Error>> + Send;
}
