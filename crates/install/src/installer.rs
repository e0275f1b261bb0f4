//! The install orchestrator
//!
//! A linear state machine with a platform-conditioned branch. Direct staging
//! (Windows-class targets) extracts straight into the live tree and skips the
//! separate move; side staging extracts into a temporary tree and merges it
//! afterwards. The voice-only variant skips the shared-asset backup and the
//! legacy purge on either path.

use crate::constants::{BACKUP_SUFFIX, SHARED_ASSET_NAME};
use crate::scope::{purge_legacy_artifacts, report_best_effort};
use crate::{staging, FetchPlan, InstallConfig, InstallContext, InstallLayout, InstallResult, VersionStore};
use stagehand_errors::{Error, InstallError};
use stagehand_events::{
    AppEvent, EventEmitter, EventSender, InstallCheckpoint, InstallEvent,
};
use stagehand_fsops as fsops;
use stagehand_types::{AuxFile, PlatformProfile, UpdateScope};
use std::time::Instant;
use tokio::fs;

/// Orchestrates one install run against a live directory tree
///
/// Owns the staging directories for the duration of the run. Not safe to run
/// concurrently with another instance targeting the same install directory;
/// process-level mutual exclusion is the caller's responsibility.
pub struct Installer<V, F> {
    config: InstallConfig,
    platform: PlatformProfile,
    layout: InstallLayout,
    direct_staging: bool,
    version_store: V,
    fetcher: F,
    event_sender: Option<EventSender>,
}

impl<V, F> std::fmt::Debug for Installer<V, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("direct_staging", &self.direct_staging)
            .finish_non_exhaustive()
    }
}

impl<V, F> EventEmitter for Installer<V, F> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl<V: VersionStore, F: FetchPlan> Installer<V, F> {
    /// Create a new installer with a fully resolved configuration
    ///
    /// `direct_staging` selects the extraction target: the live install root
    /// (direct) or a side staging tree merged later. The layout is resolved
    /// here and stays fixed for the run.
    #[must_use]
    pub fn new(
        config: InstallConfig,
        platform: PlatformProfile,
        direct_staging: bool,
        version_store: V,
        fetcher: F,
    ) -> Self {
        let layout = InstallLayout::resolve(&config, platform, direct_staging);
        Self {
            config,
            platform,
            layout,
            direct_staging,
            version_store,
            fetcher,
            event_sender: None,
        }
    }

    /// The resolved layout for this run
    #[must_use]
    pub fn layout(&self) -> &InstallLayout {
        &self.layout
    }

    /// Run the whole install state machine to completion
    ///
    /// # Errors
    ///
    /// Returns an error when the download, extraction, backup, staged move,
    /// or a version checkpoint fails; the run aborts at that point. Legacy
    /// purge and post-install cleanup failures never abort the run.
    pub async fn run(&mut self, context: InstallContext) -> Result<InstallResult, Error> {
        self.event_sender = context.event_sender.clone();
        let started = Instant::now();

        self.emit(AppEvent::Install(InstallEvent::Started {
            identifier: self.config.identifier.clone(),
            direct_staging: self.direct_staging,
            voice_only: context.voice_only,
        }));

        let pending = self
            .version_store
            .files_requiring_update()
            .await
            .inspect_err(|e| self.note_failure("version-snapshot", e))?;
        self.emit_debug(format!(
            "{} files pending update, {} archives queued",
            pending.len(),
            self.fetcher.work_items().len()
        ));

        self.prepare_staging_dirs().await?;
        self.download().await?;
        self.save_version_started().await?;

        // Scope is fixed here, before any destructive action, and read-only
        // for the rest of the run.
        let scope = UpdateScope::from_full_flag(
            self.version_store
                .is_full_update_required()
                .await
                .inspect_err(|e| self.note_failure("version-snapshot", e))?,
        );
        self.emit(AppEvent::Install(InstallEvent::ScopeDetermined { scope }));

        let files_moved = if self.direct_staging {
            self.run_direct(&context, scope).await?
        } else {
            self.run_side_staged(&context, scope).await?
        };

        self.emit_milestone(100, "Install Completed!");
        let duration = started.elapsed();
        self.emit(AppEvent::Install(InstallEvent::Completed { duration }));

        Ok(InstallResult {
            scope,
            files_moved,
            duration,
        })
    }

    /// Direct-staging order: backup and purge happen before extraction lands
    /// on top of the live tree; there is no separate move step.
    async fn run_direct(&mut self, context: &InstallContext, scope: UpdateScope) -> Result<usize, Error> {
        if !context.voice_only {
            self.backup_shared_asset().await?;
            purge_legacy_artifacts(
                &self.layout.assets_dir,
                scope,
                &self.config.script_extension,
                &self.event_sender,
            )
            .await;
        }
        self.extract_files().await?;

        // Extraction already populated the live tree; the executable stub is
        // only relocated when the two roots actually differ.
        if self.layout.extract_dir != self.layout.install_root {
            if let Some(aux) = self.platform.aux_file(&self.config.data_dir_name) {
                self.move_aux_file(&aux).await?;
            }
        }

        self.emit_milestone(97, "Cleaning up...");
        self.save_version_finished().await?;
        self.cleanup(false).await;
        Ok(0)
    }

    /// Side-staging order: extraction lands in the staging tree first, so
    /// backup and purge can wait until just before the merge.
    async fn run_side_staged(
        &mut self,
        context: &InstallContext,
        scope: UpdateScope,
    ) -> Result<usize, Error> {
        self.extract_files().await?;
        self.emit_milestone(85, "Moving files into place...");

        if !context.voice_only {
            self.backup_shared_asset().await?;
            purge_legacy_artifacts(
                &self.layout.assets_dir,
                scope,
                &self.config.script_extension,
                &self.event_sender,
            )
            .await;
        }

        let moved = self.move_files_into_place().await?;
        self.emit_milestone(97, "Cleaning up...");
        self.save_version_finished().await?;
        self.cleanup(true).await;
        Ok(moved)
    }

    /// Create the staging directories for this run
    async fn prepare_staging_dirs(&self) -> Result<(), Error> {
        fsops::create_dir_all(&self.layout.download_dir).await?;
        if !self.direct_staging {
            fsops::create_dir_all(&self.layout.extract_dir).await?;
        }
        Ok(())
    }

    /// Download every queued archive via the downloader collaborator
    ///
    /// # Errors
    ///
    /// Propagates the collaborator's failure; no local retry.
    pub async fn download(&mut self) -> Result<(), Error> {
        self.emit(AppEvent::Install(InstallEvent::DownloadStarted));
        self.fetcher
            .download()
            .await
            .inspect_err(|e| self.note_failure("download", e))?;
        self.emit(AppEvent::Install(InstallEvent::DownloadCompleted));
        Ok(())
    }

    /// Extract every downloaded archive via the extractor collaborator
    ///
    /// # Errors
    ///
    /// Propagates the collaborator's failure; no local retry.
    pub async fn extract_files(&mut self) -> Result<(), Error> {
        self.emit(AppEvent::Install(InstallEvent::ExtractionStarted {
            destination: self.layout.extract_dir.clone(),
        }));
        self.fetcher
            .extract()
            .await
            .inspect_err(|e| self.note_failure("extract", e))?;
        self.emit(AppEvent::Install(InstallEvent::ExtractionCompleted));
        Ok(())
    }

    /// Rename the mutable shared asset to its backup name
    ///
    /// Idempotent: a pre-existing backup is never overwritten, so repeated
    /// runs keep the pristine copy captured on the first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails while the source is present.
    pub async fn backup_shared_asset(&self) -> Result<(), Error> {
        let original = self.layout.data_dir.join(SHARED_ASSET_NAME);
        let backup = self
            .layout
            .data_dir
            .join(format!("{SHARED_ASSET_NAME}{BACKUP_SUFFIX}"));

        if fsops::exists(&original).await && !fsops::exists(&backup).await {
            fs::rename(&original, &backup).await.map_err(|e| {
                let err: Error = InstallError::BackupFailed {
                    path: original.display().to_string(),
                    message: e.to_string(),
                }
                .into();
                self.note_failure("backup", &err);
                err
            })?;
            self.emit(AppEvent::Install(InstallEvent::BackupCreated {
                path: backup,
            }));
        }
        Ok(())
    }

    /// Merge the staged data directory into the live one, then relocate the
    /// platform's auxiliary file, if any
    ///
    /// # Errors
    ///
    /// Returns an error naming the staging-relative path that failed; files
    /// merged before the failure stay merged.
    pub async fn move_files_into_place(&self) -> Result<usize, Error> {
        let from = self.layout.extract_dir.join(&self.config.data_dir_name);
        let to = self.layout.data_dir.clone();

        self.emit(AppEvent::Install(InstallEvent::MoveStarted {
            from: from.clone(),
            to: to.clone(),
        }));

        fsops::create_dir_all(&to).await?;
        let moved = staging::merge_into(&from, &to)
            .await
            .inspect_err(|e| self.note_failure("move", e))?;

        if let Some(aux) = self.platform.aux_file(&self.config.data_dir_name) {
            self.move_aux_file(&aux).await?;
        }

        self.emit(AppEvent::Install(InstallEvent::MoveCompleted {
            files_moved: moved,
        }));
        Ok(moved)
    }

    /// Force-move a single auxiliary file from the extraction root into the
    /// install root; absent sources are skipped.
    async fn move_aux_file(&self, aux: &AuxFile) -> Result<(), Error> {
        let from = self.layout.extract_dir.join(&aux.staged);
        let to = self.layout.install_root.join(&aux.installed);

        if !fsops::exists(&from).await {
            return Ok(());
        }
        if fsops::exists(&to).await {
            fsops::force_remove_file(&to)
                .await
                .inspect_err(|e| self.note_failure("move", e))?;
        }
        fsops::move_file(&from, &to)
            .await
            .inspect_err(|e| self.note_failure("move", e))
    }

    /// Remove the staging directories left over from this run
    ///
    /// The download directory always goes; the extraction directory only when
    /// `purge_staging_tree` is set (it is the live tree on the direct-staging
    /// variant). Both removals are best-effort: content is already installed,
    /// so a leftover temp directory is not a correctness failure.
    pub async fn cleanup(&self, purge_staging_tree: bool) {
        if let Err(err) = fsops::force_remove_tree(&self.layout.download_dir).await {
            report_best_effort(
                &self.event_sender,
                InstallError::CleanupFailed {
                    path: self.layout.download_dir.display().to_string(),
                    message: err.to_string(),
                }
                .into(),
            );
        }
        if purge_staging_tree {
            if let Err(err) = fsops::force_remove_tree(&self.layout.extract_dir).await {
                report_best_effort(
                    &self.event_sender,
                    InstallError::CleanupFailed {
                        path: self.layout.extract_dir.display().to_string(),
                        message: err.to_string(),
                    }
                    .into(),
                );
            }
        }
    }

    /// Record the "install started" checkpoint
    ///
    /// # Errors
    ///
    /// Propagates the collaborator's failure; the commit is fire-and-forget
    /// with no local retry.
    pub async fn save_version_started(&self) -> Result<(), Error> {
        self.version_store
            .record_install_started()
            .await
            .inspect_err(|e| self.note_failure("version-checkpoint", e))?;
        self.emit(AppEvent::Install(InstallEvent::CheckpointRecorded {
            checkpoint: InstallCheckpoint::Started,
        }));
        Ok(())
    }

    /// Record the "install finished" checkpoint
    ///
    /// # Errors
    ///
    /// Propagates the collaborator's failure; never called without a
    /// preceding successful `save_version_started`.
    pub async fn save_version_finished(&self) -> Result<(), Error> {
        self.version_store
            .record_install_finished()
            .await
            .inspect_err(|e| self.note_failure("version-checkpoint", e))?;
        self.emit(AppEvent::Install(InstallEvent::CheckpointRecorded {
            checkpoint: InstallCheckpoint::Finished,
        }));
        Ok(())
    }

    fn note_failure(&self, phase: &str, err: &Error) {
        self.emit(AppEvent::Install(InstallEvent::Failed {
            phase: phase.to_string(),
            error: err.to_string(),
        }));
    }
}
