//! `speckit-bridge diff` — show unified diffs of what sync would change.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use bridge_sync::diff_artifacts;
use bridge_transform::ProfileRegistry;

use super::{resolve_categories, resolve_root};
use crate::CategoryArg;

/// Arguments for `speckit-bridge diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Categories to diff (rules, workflows, skills). Omit for all.
    pub categories: Vec<CategoryArg>,

    /// Project root. Defaults to the nearest ancestor containing `.kittify/`.
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let root = resolve_root(self.root)?;
        let categories = resolve_categories(&self.categories);
        let registry = ProfileRegistry::standard();

        let diffs = diff_artifacts(&root, &registry, &categories)
            .with_context(|| format!("diff failed for '{}'", root.display()))?;

        if diffs.is_empty() {
            println!("No drift; agent artifacts match the canonical sources.");
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
