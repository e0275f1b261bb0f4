//! Recursive staged move into the live tree
//!
//! The staging tree is consumed: every file is moved into the destination
//! (force-removing any same-named file already there), directories are
//! created as needed, and the emptied staging directories are removed behind
//! the walk. Files merged before a mid-merge failure stay merged; there is
//! no rollback.

use stagehand_errors::{Error, InstallError};
use stagehand_fsops as fsops;
use std::path::Path;
use tokio::fs;

/// Merge the contents of `staging_dir` into `dest_dir`, then remove the
/// emptied `staging_dir`.
///
/// Only names present under `staging_dir` are considered; unrelated entries
/// already in `dest_dir` are untouched. Returns the number of files moved.
///
/// # Errors
///
/// Returns an error naming the staging-relative path that failed when an
/// entry cannot be read, a destination file cannot be replaced, or a move
/// fails.
pub async fn merge_into(staging_dir: &Path, dest_dir: &Path) -> Result<usize, Error> {
    if !fsops::exists(staging_dir).await {
        return Err(InstallError::StagingMissing {
            path: staging_dir.display().to_string(),
        }
        .into());
    }
    merge_level(staging_dir, staging_dir, dest_dir).await
}

async fn merge_level(staging_root: &Path, from_dir: &Path, to_dir: &Path) -> Result<usize, Error> {
    let mut moved = 0usize;

    let mut entries = fs::read_dir(from_dir)
        .await
        .map_err(|e| merge_error(staging_root, from_dir, "read_dir", &e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| merge_error(staging_root, from_dir, "read_dir", &e))?
    {
        let src = entry.path();
        let target = to_dir.join(entry.file_name());

        let metadata = fs::symlink_metadata(&src)
            .await
            .map_err(|e| merge_error(staging_root, &src, "stat", &e))?;

        if metadata.is_dir() {
            if !fsops::exists(&target).await {
                fsops::create_dir_all(&target)
                    .await
                    .map_err(|e| relabel(staging_root, &src, "create_dir", &e))?;
            }
            moved += Box::pin(merge_level(staging_root, &src, &target)).await?;
        } else {
            if fsops::exists(&target).await {
                fsops::force_remove_file(&target)
                    .await
                    .map_err(|e| relabel(staging_root, &src, "replace", &e))?;
            }
            fsops::move_file(&src, &target)
                .await
                .map_err(|e| relabel(staging_root, &src, "move", &e))?;
            moved += 1;
        }
    }

    fsops::force_remove_dir(from_dir)
        .await
        .map_err(|e| relabel(staging_root, from_dir, "remove_staging_dir", &e))?;

    Ok(moved)
}

/// Path relative to the staging root, for failure reporting.
fn relative_to(staging_root: &Path, path: &Path) -> String {
    path.strip_prefix(staging_root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn merge_error(staging_root: &Path, path: &Path, operation: &str, err: &std::io::Error) -> Error {
    InstallError::FilesystemError {
        operation: operation.to_string(),
        path: relative_to(staging_root, path),
        message: err.to_string(),
    }
    .into()
}

fn relabel(staging_root: &Path, path: &Path, operation: &str, err: &Error) -> Error {
    InstallError::FilesystemError {
        operation: operation.to_string(),
        path: relative_to(staging_root, path),
        message: err.to_string(),
    }
    .into()
}
