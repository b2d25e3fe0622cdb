//! `speckit-bridge sync` — regenerate agent artifacts from canonical sources.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use bridge_sync::{orchestrator, SyncReport, WriteResult};
use bridge_transform::ProfileRegistry;

use super::{resolve_categories, resolve_root};
use crate::CategoryArg;

/// Arguments for `speckit-bridge sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Categories to sync (rules, workflows, skills). Omit for all.
    pub categories: Vec<CategoryArg>,

    /// Show what would be written without touching any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Project root. Defaults to the nearest ancestor containing `.kittify/`.
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let root = resolve_root(self.root)?;
        let categories = resolve_categories(&self.categories);
        let registry = ProfileRegistry::standard();

        let report = orchestrator::run(&root, &registry, &categories, self.dry_run)
            .with_context(|| format!("sync failed for '{}'", root.display()))?;

        print_report(&report, self.dry_run);

        if !report.all_succeeded() {
            let names: Vec<String> = report
                .failed_agents()
                .iter()
                .map(|a| a.agent.to_string())
                .collect();
            bail!("sync failed for agent(s): {}", names.join(", "));
        }
        Ok(())
    }
}

fn print_report(report: &SyncReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };

    for (category, count) in &report.documents_read {
        println!("{prefix}read {count} {category} document(s)");
    }

    for outcome in &report.agents {
        match &outcome.error {
            None => {
                println!(
                    "{prefix}✓ '{}' synced ({} written, {} removed)",
                    outcome.agent,
                    outcome.writes.len(),
                    outcome.removed_files
                );
                for write in &outcome.writes {
                    match write {
                        WriteResult::Written { path } => println!("  ✎  {}", path.display()),
                        WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
                    }
                }
            }
            Some(err) => println!("{prefix}✗ '{}' failed: {err}", outcome.agent),
        }
    }

    if !report.registered_agents.is_empty() {
        println!(
            "{prefix}registered agents: {}",
            report.registered_agents.join(", ")
        );
    }

    for warning in &report.warnings {
        println!("{prefix}⚠ {warning}");
    }
}
