//! Integrity verification: recompute the expected tree, compare with disk.
//!
//! Verification never writes. It runs the same load + transform pipeline as
//! sync, then classifies every difference:
//!
//! - **missing** — an expected artifact has no file on disk
//! - **mismatched** — the file exists with different bytes
//! - **orphan** — a file inside an owned scope that no recipe produces

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use bridge_core::store::SourceStore;
use bridge_core::types::DocCategory;
use bridge_core::ProjectLayout;
use bridge_transform::{transform, ProfileRegistry};

use crate::error::{io_err, SyncError};
use crate::orchestrator::normalize_categories;
use crate::writer;

// ---------------------------------------------------------------------------
// Expected state
// ---------------------------------------------------------------------------

/// Everything a run would produce, keyed by project-relative path. Shared
/// by verification and diffing so both answer against the same picture.
pub(crate) struct ExpectedState {
    pub documents_read: Vec<(DocCategory, usize)>,
    pub artifacts: BTreeMap<PathBuf, String>,
    pub scopes: BTreeSet<PathBuf>,
}

pub(crate) fn expected_state(
    root: &Path,
    registry: &ProfileRegistry,
    categories: &[DocCategory],
) -> Result<ExpectedState, SyncError> {
    registry.validate()?;
    let categories = normalize_categories(categories);

    let store = SourceStore::new(ProjectLayout::new(root));
    let documents = store.load_all(&categories)?;

    let mut artifacts = BTreeMap::new();
    let mut scopes = BTreeSet::new();
    for profile in &registry.profiles {
        for category in &categories {
            let Some(recipe) = profile.recipe(*category) else {
                continue;
            };
            scopes.insert(recipe.owned_scope().to_path_buf());
            let docs = documents.get(category).map_or(&[][..], Vec::as_slice);
            for artifact in transform(docs, recipe) {
                artifacts.insert(artifact.path, artifact.content);
            }
        }
    }

    let documents_read = categories
        .iter()
        .map(|c| (*c, documents.get(c).map_or(0, Vec::len)))
        .collect();

    Ok(ExpectedState {
        documents_read,
        artifacts,
        scopes,
    })
}

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// Classification of one discrepancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueKind {
    Missing,
    Mismatched,
    Orphan,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Missing => "missing",
            IssueKind::Mismatched => "mismatched",
            IssueKind::Orphan => "orphan",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discrepancy between the expected tree and disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Project-relative path of the offending file.
    pub path: PathBuf,
    pub kind: IssueKind,
    pub detail: String,
}

/// Result of one verification pass.
#[derive(Debug)]
pub struct VerificationReport {
    pub documents_read: Vec<(DocCategory, usize)>,
    pub expected_artifacts: usize,
    /// Sorted by path.
    pub issues: Vec<Issue>,
}

impl VerificationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count_of(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }
}

// ---------------------------------------------------------------------------
// verify
// ---------------------------------------------------------------------------

/// Compare the expected tree for `categories` against the filesystem.
pub fn verify(
    root: &Path,
    registry: &ProfileRegistry,
    categories: &[DocCategory],
) -> Result<VerificationReport, SyncError> {
    let expected = expected_state(root, registry, categories)?;
    let mut issues = Vec::new();

    for (rel, content) in &expected.artifacts {
        let disk_path = root.join(rel);
        match std::fs::read(&disk_path) {
            Err(e) if e.kind() == ErrorKind::NotFound => issues.push(Issue {
                path: rel.clone(),
                kind: IssueKind::Missing,
                detail: format!("expected {} B, found nothing", content.len()),
            }),
            Err(e) => return Err(io_err(&disk_path, e)),
            Ok(bytes) => {
                if bytes != content.as_bytes() {
                    issues.push(Issue {
                        path: rel.clone(),
                        kind: IssueKind::Mismatched,
                        detail: mismatch_detail(content.as_bytes(), &bytes),
                    });
                }
            }
        }
    }

    // Only directory scopes can harbor unexpected files; fixed-file scopes
    // are fully covered by the loop above.
    for scope in &expected.scopes {
        let target = root.join(scope);
        if !target.is_dir() {
            continue;
        }
        let mut files = Vec::new();
        writer::collect_files(&target, &mut files)?;
        for file in files {
            let rel = match file.strip_prefix(root) {
                Ok(rel) => rel.to_path_buf(),
                Err(_) => file.clone(),
            };
            if !expected.artifacts.contains_key(&rel) {
                issues.push(Issue {
                    path: rel,
                    kind: IssueKind::Orphan,
                    detail: "no recipe produces this file".to_owned(),
                });
            }
        }
    }

    issues.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(
        "verified {} artifact(s), {} issue(s)",
        expected.artifacts.len(),
        issues.len()
    );
    Ok(VerificationReport {
        documents_read: expected.documents_read,
        expected_artifacts: expected.artifacts.len(),
        issues,
    })
}

fn mismatch_detail(expected: &[u8], actual: &[u8]) -> String {
    format!(
        "expected sha256:{} ({} B), found sha256:{} ({} B)",
        short_digest(expected),
        expected.len(),
        short_digest(actual),
        actual.len()
    )
}

fn short_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
