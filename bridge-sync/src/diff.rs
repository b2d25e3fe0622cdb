//! Unified diff between the expected tree and what is on disk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use bridge_core::types::DocCategory;
use bridge_transform::ProfileRegistry;

use crate::error::{io_err, SyncError};
use crate::verify::expected_state;

/// A single pending file change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    /// Project-relative path.
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Compute what `sync` would change, as unified diffs. Nothing is written.
///
/// Files that already match are omitted; a file that does not exist yet
/// diffs against empty content. Orphans have no expected side and therefore
/// do not appear here; `verify` reports them.
pub fn diff_artifacts(
    root: &Path,
    registry: &ProfileRegistry,
    categories: &[DocCategory],
) -> Result<Vec<FileDiff>, SyncError> {
    let expected = expected_state(root, registry, categories)?;

    let mut diffs = Vec::new();
    for (rel, rendered) in &expected.artifacts {
        let existing = read_existing_or_empty(&root.join(rel))?;
        if &existing == rendered {
            continue;
        }

        let old_header = format!("a/{}", rel.display());
        let new_header = format!("b/{}", rel.display());
        let unified = TextDiff::from_lines(&existing, rendered)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            path: rel.clone(),
            unified_diff: unified,
        });
    }
    Ok(diffs)
}

fn read_existing_or_empty(path: &Path) -> Result<String, SyncError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}
