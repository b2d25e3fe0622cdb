//! Error types for bridge-transform.

use thiserror::Error;

use bridge_core::types::DocCategory;

use crate::profile::AgentKind;

/// Errors raised while validating agent profiles.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// A profile lacks a recipe for one of the categories. Running anyway
    /// would leave that agent silently out of date, so runs refuse to start.
    #[error("agent profile '{agent}' has no recipe for {category} documents")]
    ProfileIncomplete {
        agent: AgentKind,
        category: DocCategory,
    },
}
