//! Integration tests for the install crate

#[cfg(test)]
mod tests {
    use stagehand_errors::Error;
    use stagehand_events::{AppEvent, InstallEvent, ProgressEvent};
    use stagehand_install::*;
    use stagehand_types::{PlatformProfile, UpdateScope, WorkItem};
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::tempdir;

    #[derive(Default)]
    struct CheckpointCounters {
        started: AtomicUsize,
        finished: AtomicUsize,
    }

    struct FakeVersionStore {
        full_update: bool,
        pending: Vec<PathBuf>,
        counters: Arc<CheckpointCounters>,
    }

    impl FakeVersionStore {
        fn new(full_update: bool) -> (Self, Arc<CheckpointCounters>) {
            let counters = Arc::new(CheckpointCounters::default());
            (
                Self {
                    full_update,
                    pending: vec![PathBuf::from("Data/file1.txt")],
                    counters: counters.clone(),
                },
                counters,
            )
        }
    }

    impl VersionStore for FakeVersionStore {
        async fn files_requiring_update(&self) -> Result<Vec<PathBuf>, Error> {
            Ok(self.pending.clone())
        }

        async fn is_full_update_required(&self) -> Result<bool, Error> {
            Ok(self.full_update)
        }

        async fn record_install_started(&self) -> Result<(), Error> {
            self.counters.started.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn record_install_finished(&self) -> Result<(), Error> {
            // "finished" must never land without a preceding "started"
            assert!(self.counters.started.load(Ordering::SeqCst) > 0);
            self.counters.finished.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Fake downloader/extractor: download drops a marker archive into the
    /// download dir, extract materializes the staged files.
    struct FakeFetcher {
        items: Vec<WorkItem>,
        download_dir: PathBuf,
        extract_dir: PathBuf,
        staged_files: Vec<(PathBuf, &'static str)>,
    }

    impl FakeFetcher {
        fn new(
            download_dir: &Path,
            extract_dir: &Path,
            staged_files: Vec<(PathBuf, &'static str)>,
        ) -> Self {
            Self {
                items: vec![WorkItem::new(
                    "https://example.com/update.7z",
                    extract_dir.to_path_buf(),
                )],
                download_dir: download_dir.to_path_buf(),
                extract_dir: extract_dir.to_path_buf(),
                staged_files,
            }
        }
    }

    impl FetchPlan for FakeFetcher {
        fn work_items(&self) -> &[WorkItem] {
            &self.items
        }

        async fn download(&mut self) -> Result<(), Error> {
            std::fs::create_dir_all(&self.download_dir).unwrap();
            std::fs::write(self.download_dir.join("update.7z"), b"archive").unwrap();
            Ok(())
        }

        async fn extract(&mut self) -> Result<(), Error> {
            for (relative, content) in &self.staged_files {
                let dest = self.extract_dir.join(relative);
                std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
                std::fs::write(dest, content).unwrap();
            }
            Ok(())
        }
    }

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    fn drain(rx: &mut stagehand_events::EventReceiver) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn side_staging_merges_and_cleans_up() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("game");
        write(&root.join("Data/file1.txt"), "old");
        write(&root.join("Data/file2.txt"), "keep");

        let config = InstallConfig::new(&root, "Data", "Onikakushi");
        let layout = InstallLayout::resolve(&config, PlatformProfile::Other, false);
        let (store, counters) = FakeVersionStore::new(false);
        let fetcher = FakeFetcher::new(
            &layout.download_dir,
            &layout.extract_dir,
            vec![(PathBuf::from("Data/file1.txt"), "new")],
        );

        let mut installer =
            Installer::new(config, PlatformProfile::Other, false, store, fetcher);
        let (tx, mut rx) = stagehand_events::channel();
        let result = installer
            .run(InstallContext::new().with_event_sender(tx))
            .await
            .unwrap();

        assert_eq!(result.scope, UpdateScope::Partial);
        assert_eq!(result.files_moved, 1);
        assert_eq!(read(&root.join("Data/file1.txt")), "new");
        assert_eq!(read(&root.join("Data/file2.txt")), "keep");
        assert!(!root.join("Onikakushi Extraction").exists());
        assert!(!root.join("Onikakushi Downloads").exists());
        assert_eq!(counters.started.load(Ordering::SeqCst), 1);
        assert_eq!(counters.finished.load(Ordering::SeqCst), 1);

        let events = drain(&mut rx);
        let milestones: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Progress(ProgressEvent::Milestone { percent, .. }) => Some(*percent),
                _ => None,
            })
            .collect();
        assert_eq!(milestones, vec![85, 97, 100]);
    }

    #[tokio::test]
    async fn full_update_purges_caches_and_backs_up_shared_asset() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("game");
        write(&root.join("Data/sharedassets0.assets"), "pristine");
        write(&root.join("Data/StreamingAssets/CG/a.png"), "cg");
        write(&root.join("Data/StreamingAssets/CGAlt/b.png"), "cgalt");

        let config = InstallConfig::new(&root, "Data", "Onikakushi");
        let layout = InstallLayout::resolve(&config, PlatformProfile::Other, false);
        let (store, _) = FakeVersionStore::new(true);
        let fetcher = FakeFetcher::new(
            &layout.download_dir,
            &layout.extract_dir,
            vec![(PathBuf::from("Data/StreamingAssets/CG/a.png"), "fresh")],
        );

        let mut installer =
            Installer::new(config, PlatformProfile::Other, false, store, fetcher);
        let result = installer.run(InstallContext::new()).await.unwrap();

        assert_eq!(result.scope, UpdateScope::Full);
        // Old caches purged, then the staged CG content merged back in
        assert!(!root.join("Data/StreamingAssets/CGAlt").exists());
        assert_eq!(read(&root.join("Data/StreamingAssets/CG/a.png")), "fresh");
        // Shared asset renamed away, backup holds the pristine copy
        assert!(!root.join("Data/sharedassets0.assets").exists());
        assert_eq!(read(&root.join("Data/sharedassets0.assets.backup")), "pristine");
    }

    #[tokio::test]
    async fn voice_only_direct_staging_skips_backup_and_purge() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("game");
        write(&root.join("Higurashi_Data/sharedassets0.assets"), "pristine");
        write(&root.join("Higurashi_Data/StreamingAssets/CG/a.png"), "cg");
        write(&root.join("leftover.marker"), "still here");

        let config = InstallConfig::new(&root, "Higurashi_Data", "Onikakushi");
        let layout = InstallLayout::resolve(&config, PlatformProfile::Windows, true);
        assert_eq!(layout.extract_dir, root);
        let (store, counters) = FakeVersionStore::new(true);
        let fetcher = FakeFetcher::new(
            &layout.download_dir,
            &layout.extract_dir,
            vec![(
                PathBuf::from("Higurashi_Data/StreamingAssets/voice.bin"),
                "voices",
            )],
        );

        let mut installer =
            Installer::new(config, PlatformProfile::Windows, true, store, fetcher);
        let (tx, mut rx) = stagehand_events::channel();
        let result = installer
            .run(
                InstallContext::new()
                    .with_voice_only(true)
                    .with_event_sender(tx),
            )
            .await
            .unwrap();

        // Direct staging has no separate move step
        assert_eq!(result.files_moved, 0);
        // Neither backup nor purge ran, despite the full-update scope
        assert_eq!(read(&root.join("Higurashi_Data/sharedassets0.assets")), "pristine");
        assert!(!root.join("Higurashi_Data/sharedassets0.assets.backup").exists());
        assert!(root.join("Higurashi_Data/StreamingAssets/CG/a.png").exists());
        // Extracted content landed directly in the live tree
        assert_eq!(
            read(&root.join("Higurashi_Data/StreamingAssets/voice.bin")),
            "voices"
        );
        // Download dir removed; extraction dir (== live root) untouched
        assert!(!root.join("Onikakushi Downloads").exists());
        assert_eq!(read(&root.join("leftover.marker")), "still here");
        assert_eq!(counters.finished.load(Ordering::SeqCst), 1);

        let events = drain(&mut rx);
        assert!(!events
            .iter()
            .any(|e| matches!(e, AppEvent::Install(InstallEvent::BackupCreated { .. }))));
        assert!(!events
            .iter()
            .any(|e| matches!(e, AppEvent::Install(InstallEvent::MoveStarted { .. }))));
    }

    #[tokio::test]
    async fn backup_is_idempotent_across_runs() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("game");
        write(&root.join("Data/sharedassets0.assets"), "pristine");

        let config = InstallConfig::new(&root, "Data", "Onikakushi");
        let layout = InstallLayout::resolve(&config, PlatformProfile::Other, false);
        let (store, _) = FakeVersionStore::new(false);
        let fetcher = FakeFetcher::new(&layout.download_dir, &layout.extract_dir, vec![]);
        let installer = Installer::new(config, PlatformProfile::Other, false, store, fetcher);

        installer.backup_shared_asset().await.unwrap();
        // A later run writes a fresh shared asset; the backup must survive it
        write(&root.join("Data/sharedassets0.assets"), "modified");
        installer.backup_shared_asset().await.unwrap();

        assert_eq!(read(&root.join("Data/sharedassets0.assets.backup")), "pristine");
        assert_eq!(read(&root.join("Data/sharedassets0.assets")), "modified");
    }

    #[tokio::test]
    async fn mac_side_staging_relocates_the_player_icon() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("Higu.app");
        write(&root.join("Contents/Resources/Data/existing.bin"), "x");

        let config = InstallConfig::new(&root, "Game_Data", "Onikakushi");
        let layout = InstallLayout::resolve(&config, PlatformProfile::Mac, false);
        let (store, _) = FakeVersionStore::new(false);
        let fetcher = FakeFetcher::new(
            &layout.download_dir,
            &layout.extract_dir,
            vec![
                (PathBuf::from("Game_Data/level0"), "scene"),
                (
                    PathBuf::from("Contents/Resources/PlayerIcon.icns"),
                    "icon",
                ),
            ],
        );

        let mut installer = Installer::new(config, PlatformProfile::Mac, false, store, fetcher);
        installer.run(InstallContext::new()).await.unwrap();

        // Staged data dir merged into the bundle's data directory
        assert_eq!(read(&root.join("Contents/Resources/Data/level0")), "scene");
        assert_eq!(read(&root.join("Contents/Resources/Data/existing.bin")), "x");
        // Icon relocated individually after the bulk merge
        assert_eq!(read(&root.join("Contents/Resources/PlayerIcon.icns")), "icon");
    }

    #[tokio::test]
    async fn extraction_failure_aborts_before_the_move() {
        struct FailingFetcher {
            items: Vec<WorkItem>,
        }
        impl FetchPlan for FailingFetcher {
            fn work_items(&self) -> &[WorkItem] {
                &self.items
            }
            async fn download(&mut self) -> Result<(), Error> {
                Ok(())
            }
            async fn extract(&mut self) -> Result<(), Error> {
                Err(stagehand_errors::InstallError::ExtractionFailed {
                    message: "corrupt archive".to_string(),
                }
                .into())
            }
        }

        let temp = tempdir().unwrap();
        let root = temp.path().join("game");
        write(&root.join("Data/file1.txt"), "old");

        let config = InstallConfig::new(&root, "Data", "Onikakushi");
        let (store, counters) = FakeVersionStore::new(false);
        let fetcher = FailingFetcher { items: vec![] };
        let mut installer =
            Installer::new(config, PlatformProfile::Other, false, store, fetcher);

        let err = installer.run(InstallContext::new()).await.unwrap_err();
        assert!(err.to_string().contains("extraction failed"));
        // The live tree was never touched
        assert_eq!(read(&root.join("Data/file1.txt")), "old");
        // Started was recorded, finished was not
        assert_eq!(counters.started.load(Ordering::SeqCst), 1);
        assert_eq!(counters.finished.load(Ordering::SeqCst), 0);
    }
}
