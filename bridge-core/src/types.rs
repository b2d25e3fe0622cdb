//! Domain types for the Spec Kitty bridge.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem
//! paths. Artifact paths are relative to the project root until the moment
//! they touch the filesystem.

use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a canonical document.
///
/// For rules and workflows this is the source file's stem; for skills it is
/// the skill directory's name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocName(pub String);

impl fmt::Display for DocName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for DocName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DocName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The category of a canonical document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocCategory {
    Rule,
    Workflow,
    Skill,
}

impl DocCategory {
    /// Every category, in the order runs process them.
    pub fn all() -> &'static [DocCategory] {
        &[DocCategory::Rule, DocCategory::Workflow, DocCategory::Skill]
    }

    /// Plural form, as used by source directories and the CLI.
    pub fn plural(&self) -> &'static str {
        match self {
            DocCategory::Rule => "rules",
            DocCategory::Workflow => "workflows",
            DocCategory::Skill => "skills",
        }
    }
}

impl fmt::Display for DocCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocCategory::Rule => write!(f, "rule"),
            DocCategory::Workflow => write!(f, "workflow"),
            DocCategory::Skill => write!(f, "skill"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A canonical document loaded from the source of truth.
///
/// `content` is normalized to LF line endings at load time, so everything
/// downstream (transforms, writes, verification) sees one representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub category: DocCategory,
    pub name: DocName,
    pub content: String,
}

/// One file a sync run intends to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Destination path relative to the project root.
    pub path: PathBuf,
    pub content: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
