//! Bridge core library — domain types, source loading, project config.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`error`] — [`SourceError`], [`ConfigError`]
//! - [`paths`] — root discovery and [`paths::ProjectLayout`]
//! - [`store`] — [`store::SourceStore`], the canonical document reader
//! - [`config`] — agent registration in `.kittify/config.yaml`

pub mod config;
pub mod error;
pub mod paths;
pub mod store;
pub mod types;

pub use error::{ConfigError, SourceError};
pub use paths::{find_project_root, find_project_root_from, ProjectLayout};
pub use store::SourceStore;
pub use types::{Artifact, DocCategory, DocName, SourceDocument};
