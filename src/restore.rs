//! Restore the live sprite directory from the backup tree.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use crate::swap::{png_files, BACKUP_DIR_NAME};

/// Error type for a restore run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RestoreError {
    /// No backup exists yet; the user must run a swap first.
    #[error("no backup found at {0}; run a swap at least once first")]
    NoBackupFound(PathBuf),
    /// The sprite directory has no parent, so no backup can exist either.
    #[error("sprite directory has no parent: {0}")]
    NoParentDir(PathBuf),
}

/// Aggregate outcome of one restore run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Files copied back over the live directory.
    pub restored: usize,
    /// Files that could not be copied back.
    pub failed: usize,
}

/// Copy every backed-up `.png` back over the live sprite directory.
///
/// Only files present in the backup are touched; nothing is deleted.
/// Per-file failures are logged and the walk continues.
pub fn restore(sprite_dir: &Path) -> Result<RestoreReport, RestoreError> {
    let backup_dir = sprite_dir
        .parent()
        .map(|parent| parent.join(BACKUP_DIR_NAME))
        .ok_or_else(|| RestoreError::NoParentDir(sprite_dir.to_path_buf()))?;
    if !backup_dir.exists() {
        return Err(RestoreError::NoBackupFound(backup_dir));
    }

    let mut report = RestoreReport::default();
    for path in png_files(&backup_dir) {
        let rel = match path.strip_prefix(&backup_dir) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        let dst = sprite_dir.join(rel);
        if let Some(parent) = dst.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("could not create directory {}: {}", parent.display(), e);
                report.failed += 1;
                continue;
            }
        }
        match fs::copy(&path, &dst) {
            Ok(_) => report.restored += 1,
            Err(e) => {
                warn!("could not restore {}: {}", dst.display(), e);
                report.failed += 1;
            }
        }
    }
    Ok(report)
}
