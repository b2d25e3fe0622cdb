//! Recipes: how one (agent, category) pair turns documents into artifacts.

use std::path::{Path, PathBuf};

use bridge_core::types::DocName;

// ---------------------------------------------------------------------------
// Substitutions
// ---------------------------------------------------------------------------

/// A literal token swap applied to document content before shaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub marker: String,
    pub replacement: String,
}

impl Substitution {
    pub fn new(marker: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            replacement: replacement.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Transform modes
// ---------------------------------------------------------------------------

/// The shaping step of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformMode {
    /// Content passes through unchanged (beyond substitutions).
    DirectCopy,
    /// Content passes through; only the destination suffix differs from the
    /// source's `.md`.
    RenameExtension,
    /// Content becomes the `prompt` of a TOML command envelope, with a
    /// `description` lifted from the document's front matter.
    WrapInStructuredBlock,
    /// The whole category collapses into one artifact: a preamble followed
    /// by each document under a `## ` heading.
    ConcatenateWithHeaders {
        preamble: String,
        heading_prefix: String,
    },
}

impl TransformMode {
    /// Concatenating modes produce one artifact per category; the rest
    /// produce one artifact per document.
    pub fn is_per_document(&self) -> bool {
        !matches!(self, TransformMode::ConcatenateWithHeaders { .. })
    }
}

// ---------------------------------------------------------------------------
// Output paths
// ---------------------------------------------------------------------------

/// Where a recipe's artifacts land, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputPath {
    /// One file per document: `<dir>/<name><suffix>`. The suffix may contain
    /// a separator, so `tdd` + `/SKILL.md` yields `<dir>/tdd/SKILL.md`.
    PerDocument { dir: PathBuf, suffix: String },
    /// A single fixed file for the whole category.
    Fixed(PathBuf),
}

impl OutputPath {
    pub fn per_document(dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        OutputPath::PerDocument {
            dir: dir.into(),
            suffix: suffix.into(),
        }
    }

    pub fn fixed(path: impl Into<PathBuf>) -> Self {
        OutputPath::Fixed(path.into())
    }

    /// Destination for one named document.
    pub fn for_doc(&self, name: &DocName) -> PathBuf {
        match self {
            OutputPath::PerDocument { dir, suffix } => dir.join(format!("{name}{suffix}")),
            OutputPath::Fixed(path) => path.clone(),
        }
    }

    /// The filesystem scope this recipe owns outright: the whole directory
    /// for per-document outputs, the single file for fixed ones. Cleaning
    /// and orphan detection operate on exactly this scope.
    pub fn owned_scope(&self) -> &Path {
        match self {
            OutputPath::PerDocument { dir, .. } => dir,
            OutputPath::Fixed(path) => path,
        }
    }

    pub fn is_per_document(&self) -> bool {
        matches!(self, OutputPath::PerDocument { .. })
    }
}

// ---------------------------------------------------------------------------
// Recipe
// ---------------------------------------------------------------------------

/// One (agent, category) transformation: substitutions, a shaping mode and
/// a destination. Per-document modes must pair with `PerDocument` outputs
/// and concatenation with `Fixed`; [`Recipe::is_coherent`] checks this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub mode: TransformMode,
    pub output: OutputPath,
    pub substitutions: Vec<Substitution>,
}

impl Recipe {
    pub fn owned_scope(&self) -> &Path {
        self.output.owned_scope()
    }

    /// True when the mode's artifact arity matches the output shape.
    pub fn is_coherent(&self) -> bool {
        self.mode.is_per_document() == self.output.is_per_document()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
