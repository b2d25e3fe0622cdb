//! Filesystem primitives: clean-before-write and atomic writes.
//!
//! ## `atomic_write` protocol
//!
//! 1. Ensure the parent directory exists.
//! 2. Write to `<path>.bridge.tmp` (always a sibling — same filesystem, so
//!    the rename cannot cross a mount boundary).
//! 3. Rename to the final path (atomic on POSIX).
//! 4. On rename failure, remove the `.tmp` and surface the error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Atomically write one artifact file, creating parent directories.
pub(crate) fn atomic_write(path: &Path, content: &str) -> Result<(), SyncError> {
    let tmp = PathBuf::from(format!("{}.bridge.tmp", path.display()));
    atomic_write_with_tmp(path, content, &tmp)
}

fn atomic_write_with_tmp(path: &Path, content: &str, tmp: &Path) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// clean_scope
// ---------------------------------------------------------------------------

/// Remove whatever currently occupies an owned scope.
///
/// Directory scopes are deleted recursively and recreated empty; file scopes
/// are deleted. A scope that does not exist counts as already clean. Returns
/// the number of files removed.
pub(crate) fn clean_scope(root: &Path, scope: &Path) -> Result<usize, SyncError> {
    let target = root.join(scope);
    let metadata = match std::fs::metadata(&target) {
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(io_err(&target, e)),
        Ok(m) => m,
    };

    if metadata.is_dir() {
        let mut files = Vec::new();
        collect_files(&target, &mut files)?;
        std::fs::remove_dir_all(&target).map_err(|e| io_err(&target, e))?;
        std::fs::create_dir_all(&target).map_err(|e| io_err(&target, e))?;
        tracing::debug!("cleaned {} file(s) under {}", files.len(), target.display());
        Ok(files.len())
    } else {
        std::fs::remove_file(&target).map_err(|e| io_err(&target, e))?;
        tracing::debug!("removed {}", target.display());
        Ok(1)
    }
}

// ---------------------------------------------------------------------------
// collect_files
// ---------------------------------------------------------------------------

/// Every regular file under `dir`, recursively. Shared by cleaning (for the
/// removal count) and orphan detection.
pub(crate) fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), SyncError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
