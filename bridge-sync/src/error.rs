//! Error types for bridge-sync.

use std::path::PathBuf;

use thiserror::Error;

use bridge_core::error::SourceError;
use bridge_transform::ProfileError;

/// All errors that can arise from sync, verify and diff operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error reading the canonical source tree.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// An invalid agent profile; nothing was cleaned or written.
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
