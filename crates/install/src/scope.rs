//! Update-scoped purge of legacy artifacts
//!
//! Stale compiled scripts are removed on every run; the large legacy
//! image-cache directories are removed only when the whole data set is being
//! replaced. Every removal here is best-effort: failures are reported through
//! the event channel at the severity the error carries and never abort the
//! run.

use crate::constants::{COMPILED_SCRIPTS_DIR, LEGACY_IMAGE_CACHE_DIRS};
use stagehand_errors::{Error, InstallError, Severity};
use stagehand_events::{EventEmitter, EventSender};
use stagehand_fsops as fsops;
use stagehand_types::UpdateScope;
use std::path::Path;
use tokio::fs;

/// Purge legacy artifacts under `assets_dir` according to `scope`.
///
/// Never fails; each artifact that cannot be removed is reported through
/// `emitter` and the purge continues with the next one.
pub async fn purge_legacy_artifacts(
    assets_dir: &Path,
    scope: UpdateScope,
    script_extension: &str,
    emitter: &Option<EventSender>,
) {
    purge_compiled_scripts(assets_dir, script_extension, emitter).await;

    if scope.is_full() {
        emitter.emit_debug("full update: deleting legacy image-cache directories");
        for dir_name in LEGACY_IMAGE_CACHE_DIRS {
            let dir = assets_dir.join(dir_name);
            if !fsops::exists(&dir).await {
                continue;
            }
            if let Err(err) = fsops::force_remove_tree(&dir).await {
                report_best_effort(
                    emitter,
                    InstallError::LegacyPurgeFailed {
                        path: dir.display().to_string(),
                        message: err.to_string(),
                    }
                    .into(),
                );
            }
        }
    } else {
        emitter.emit_debug("partial update: leaving legacy image-cache directories intact");
    }
}

/// Remove stale compiled-script files matching the configured extension.
async fn purge_compiled_scripts(
    assets_dir: &Path,
    script_extension: &str,
    emitter: &Option<EventSender>,
) {
    let scripts_dir = assets_dir.join(COMPILED_SCRIPTS_DIR);
    let mut entries = match fs::read_dir(&scripts_dir).await {
        Ok(entries) => entries,
        // Nothing compiled yet; nothing to purge
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return,
        Err(err) => {
            report_best_effort(
                emitter,
                InstallError::LegacyPurgeFailed {
                    path: scripts_dir.display().to_string(),
                    message: err.to_string(),
                }
                .into(),
            );
            return;
        }
    };

    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let path = entry.path();
                if path
                    .extension()
                    .is_none_or(|ext| ext != std::ffi::OsStr::new(script_extension))
                {
                    continue;
                }
                if let Err(err) = fsops::force_remove_file(&path).await {
                    report_best_effort(
                        emitter,
                        InstallError::LegacyPurgeFailed {
                            path: path.display().to_string(),
                            message: err.to_string(),
                        }
                        .into(),
                    );
                }
            }
            Ok(None) => break,
            Err(err) => {
                report_best_effort(
                    emitter,
                    InstallError::LegacyPurgeFailed {
                        path: scripts_dir.display().to_string(),
                        message: err.to_string(),
                    }
                    .into(),
                );
                break;
            }
        }
    }
}

/// Route a best-effort failure to the event channel at its own severity.
pub(crate) fn report_best_effort(emitter: &Option<EventSender>, err: Error) {
    match err.severity() {
        Severity::Warning => emitter.emit_warning(err.to_string()),
        Severity::Ignorable => emitter.emit_debug(err.to_string()),
        // Fatal errors do not belong on best-effort paths; surface loudly
        Severity::Fatal => emitter.emit_operation_failed("best-effort cleanup", err.to_string()),
    }
}
