//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};

use bridge_core::paths::find_project_root;
use bridge_core::types::DocCategory;

use crate::CategoryArg;

pub mod diff;
pub mod sync;
pub mod verify;

/// Resolve the project root: an explicit `--root` wins, otherwise walk up
/// from the current directory looking for the `.kittify` marker.
pub(crate) fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(path) => path
            .canonicalize()
            .with_context(|| format!("could not resolve --root '{}'", path.display())),
        None => find_project_root()
            .context("no project root found — run inside a Spec Kitty project or pass --root"),
    }
}

/// No categories on the command line means all of them.
pub(crate) fn resolve_categories(args: &[CategoryArg]) -> Vec<DocCategory> {
    if args.is_empty() {
        DocCategory::all().to_vec()
    } else {
        args.iter().map(|c| c.0).collect()
    }
}
