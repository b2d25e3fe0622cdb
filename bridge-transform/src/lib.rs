//! Bridge transform library — agent profiles and the document pipeline.
//!
//! Given documents from `bridge-core`, this crate decides what every agent's
//! configuration tree should contain. It is deliberately filesystem-free:
//! sync writes what [`pipeline::transform`] returns, verification recomputes
//! it and compares.

pub mod error;
pub mod pipeline;
pub mod profile;
pub mod recipe;

pub use error::ProfileError;
pub use pipeline::{apply_substitutions, transform};
pub use profile::{AgentKind, AgentProfile, ProfileRegistry};
pub use recipe::{OutputPath, Recipe, Substitution, TransformMode};
