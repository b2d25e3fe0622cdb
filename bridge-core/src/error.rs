//! Error types for bridge-core.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::{DocCategory, DocName};

/// All errors that can arise while reading the canonical source tree.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A category's source directory is absent. This aborts the whole run:
    /// an empty directory means "no documents", a missing one means the
    /// project was never initialized (or the command runs in the wrong place).
    #[error("{category} source directory not found at {path}; run `spec-kitty init` or check the project root")]
    SourceMissing {
        category: DocCategory,
        path: PathBuf,
    },

    /// Two source files in the same category share a name. Last-write-wins
    /// would silently drop one of them, so this is fatal instead.
    #[error("duplicate {category} name '{name}': second definition at {path}")]
    DuplicateName {
        category: DocCategory,
        name: DocName,
        path: PathBuf,
    },

    /// No ancestor of the starting directory contains `.kittify/`.
    #[error("no Spec Kitty project found: no .kittify directory in {start} or any parent")]
    RootNotFound { start: PathBuf },

    /// Underlying I/O failure (permission denied, unreadable file, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// All errors that can arise while updating the project config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure reading or writing the config file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse or serialization failure.
    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A node that must be a YAML mapping holds some other shape.
    #[error("`{section}` in {path} is not a YAML mapping")]
    NotAMapping {
        path: PathBuf,
        section: &'static str,
    },
}

pub(crate) fn io_err(path: &Path, source: std::io::Error) -> SourceError {
    SourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}
