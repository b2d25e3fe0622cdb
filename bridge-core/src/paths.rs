//! Project root discovery and source-tree layout.
//!
//! # Source layout
//!
//! ```text
//! <project root>/
//!   .kittify/
//!     config.yaml            (project config — agent registration lives here)
//!     memory/                (rules, *.md, recursive)
//!     skills/
//!       <name>/SKILL.md      (one directory per skill)
//!   .windsurf/
//!     workflows/             (workflows, *.md, recursive)
//! ```
//!
//! # API pattern
//!
//! Discovery has two forms:
//! - `find_project_root_from(start: &Path)` — explicit start; used in tests
//! - `find_project_root()` — starts from the current directory, delegates
//!
//! Tests must NEVER call the no-arg wrapper; always pass an explicit start.

use std::path::{Path, PathBuf};

use crate::error::{io_err, SourceError};
use crate::types::DocCategory;

/// The directory whose presence marks a Spec Kitty project root.
pub const PROJECT_MARKER: &str = ".kittify";

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Resolves well-known paths under one project root. Pure, no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where a category's canonical documents live.
    pub fn source_dir(&self, category: DocCategory) -> PathBuf {
        match category {
            DocCategory::Rule => self.root.join(".kittify").join("memory"),
            DocCategory::Workflow => self.root.join(".windsurf").join("workflows"),
            DocCategory::Skill => self.root.join(".kittify").join("skills"),
        }
    }

    /// `<root>/.kittify/config.yaml`
    pub fn config_path(&self) -> PathBuf {
        self.root.join(PROJECT_MARKER).join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Root discovery
// ---------------------------------------------------------------------------

/// Walk `start` and its ancestors until one contains `.kittify/`.
pub fn find_project_root_from(start: &Path) -> Result<PathBuf, SourceError> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_MARKER).is_dir())
        .map(Path::to_path_buf)
        .ok_or_else(|| SourceError::RootNotFound {
            start: start.to_path_buf(),
        })
}

/// `find_project_root_from` convenience wrapper (starts at the current directory).
pub fn find_project_root() -> Result<PathBuf, SourceError> {
    let cwd = std::env::current_dir().map_err(|e| io_err(Path::new("."), e))?;
    find_project_root_from(&cwd)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn source_dirs_match_layout() {
        let layout = ProjectLayout::new("/proj");
        assert_eq!(
            layout.source_dir(DocCategory::Rule),
            PathBuf::from("/proj/.kittify/memory")
        );
        assert_eq!(
            layout.source_dir(DocCategory::Workflow),
            PathBuf::from("/proj/.windsurf/workflows")
        );
        assert_eq!(
            layout.source_dir(DocCategory::Skill),
            PathBuf::from("/proj/.kittify/skills")
        );
        assert_eq!(
            layout.config_path(),
            PathBuf::from("/proj/.kittify/config.yaml")
        );
    }

    #[test]
    fn finds_root_in_start_dir() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::create_dir_all(tmp.path().join(".kittify")).unwrap();
        let root = find_project_root_from(tmp.path()).expect("root");
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn finds_root_from_nested_dir() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::create_dir_all(tmp.path().join(".kittify")).unwrap();
        let nested = tmp.path().join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();
        let root = find_project_root_from(&nested).expect("root");
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn marker_file_is_not_a_root() {
        // `.kittify` must be a directory, not a plain file.
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join(".kittify"), "not a dir").unwrap();
        let err = find_project_root_from(tmp.path()).unwrap_err();
        assert!(matches!(err, SourceError::RootNotFound { .. }));
    }

    #[test]
    fn missing_marker_reports_start_path() {
        let tmp = TempDir::new().expect("tempdir");
        let err = find_project_root_from(tmp.path()).unwrap_err();
        assert!(err.to_string().contains(".kittify"));
    }
}
