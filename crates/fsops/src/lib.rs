#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Forced filesystem operations for stagehand
//!
//! Every destructive primitive in this crate succeeds even when the target
//! entry carries a read-only attribute: the attribute is cleared immediately
//! before the destructive action. The attribute is not restored afterwards,
//! since the entry is being deleted or replaced.

use stagehand_errors::StorageError;
use std::path::Path;
use tokio::fs;

/// Result type for filesystem operations
type Result<T> = std::result::Result<T, stagehand_errors::Error>;

/// Clear the read-only attribute on `path`, if set.
///
/// Failure to stat or re-permission the entry is reported so callers can
/// decide whether the follow-up delete is still worth attempting.
async fn clear_readonly(path: &Path) -> std::io::Result<()> {
    let metadata = fs::metadata(path).await?;
    let mut permissions = metadata.permissions();
    if !permissions.readonly() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        permissions.set_mode(permissions.mode() | 0o200);
    }
    #[cfg(not(unix))]
    #[allow(clippy::permissions_set_readonly_false)]
    permissions.set_readonly(false);

    fs::set_permissions(path, permissions).await
}

/// Check if a path exists
pub async fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).await.is_ok()
}

/// Create a directory with all parent directories
///
/// # Errors
///
/// Returns an error if permission is denied or any I/O operation fails
/// during directory creation.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| StorageError::from_io(&e, path).into())
}

/// Remove a single file, even if it is marked read-only
///
/// # Errors
///
/// Returns an error if the path does not exist or the delete fails after
/// the attribute clear (e.g. the file is open elsewhere).
pub async fn force_remove_file(path: &Path) -> Result<()> {
    clear_readonly(path)
        .await
        .map_err(|e| StorageError::from_io(&e, path))?;
    fs::remove_file(path)
        .await
        .map_err(|e| StorageError::from_io(&e, path).into())
}

/// Remove an empty directory, even if it is marked read-only
///
/// # Errors
///
/// Returns an error if the directory is missing or not empty.
pub async fn force_remove_dir(path: &Path) -> Result<()> {
    clear_readonly(path)
        .await
        .map_err(|e| StorageError::from_io(&e, path))?;
    fs::remove_dir(path)
        .await
        .map_err(|e| StorageError::from_io(&e, path).into())
}

/// Recursively delete `path` and all its contents
///
/// Entries that fail to delete get the read-only attribute cleared and
/// exactly one retry before the failure propagates. A missing `path` is a
/// no-op.
///
/// # Errors
///
/// Returns an error if an entry still cannot be removed after the retried
/// attribute clear.
pub async fn force_remove_tree(path: &Path) -> Result<()> {
    if !exists(path).await {
        return Ok(());
    }
    remove_tree_contents(path).await?;
    remove_dir_with_retry(path).await
}

async fn remove_tree_contents(path: &Path) -> Result<()> {
    let mut entries = fs::read_dir(path)
        .await
        .map_err(|e| StorageError::from_io(&e, path))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| StorageError::from_io(&e, path))?
    {
        let entry_path = entry.path();
        let metadata = fs::symlink_metadata(&entry_path)
            .await
            .map_err(|e| StorageError::from_io(&e, &entry_path))?;

        if metadata.is_dir() {
            Box::pin(remove_tree_contents(&entry_path)).await?;
            remove_dir_with_retry(&entry_path).await?;
        } else {
            remove_file_with_retry(&entry_path).await?;
        }
    }

    Ok(())
}

async fn remove_file_with_retry(path: &Path) -> Result<()> {
    if fs::remove_file(path).await.is_ok() {
        return Ok(());
    }
    // Assume a read-only entry blocked the delete; clear and retry once
    let _ = clear_readonly(path).await;
    fs::remove_file(path)
        .await
        .map_err(|e| StorageError::from_io(&e, path).into())
}

async fn remove_dir_with_retry(path: &Path) -> Result<()> {
    if fs::remove_dir(path).await.is_ok() {
        return Ok(());
    }
    let _ = clear_readonly(path).await;
    fs::remove_dir(path)
        .await
        .map_err(|e| StorageError::from_io(&e, path).into())
}

/// Move a file from `src` to `dst`
///
/// Rename where possible; falls back to copy-then-remove-source across
/// volumes. The destination ends up holding either the old file or the
/// complete new file, never a truncated one.
///
/// # Errors
///
/// Returns an error if both the rename and the copy fallback fail, or if
/// the source cannot be removed after a successful copy.
pub async fn move_file(src: &Path, dst: &Path) -> Result<()> {
    if fs::rename(src, dst).await.is_ok() {
        return Ok(());
    }

    fs::copy(src, dst).await.map_err(|e| StorageError::MoveFailed {
        from: src.display().to_string(),
        to: dst.display().to_string(),
        message: e.to_string(),
    })?;
    force_remove_file(src).await
}
