//! Spec Kitty Bridge — mirror canonical project documents into agent trees.
//!
//! # Usage
//!
//! ```text
//! speckit-bridge sync [rules|workflows|skills ...] [--dry-run] [--root <path>]
//! speckit-bridge verify [rules|workflows|skills ...] [--json] [--root <path>]
//! speckit-bridge diff [rules|workflows|skills ...] [--root <path>]
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bridge_core::types::DocCategory;
use commands::{diff::DiffArgs, sync::SyncArgs, verify::VerifyArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "speckit-bridge",
    version,
    about = "Mirror Spec Kitty rules, workflows, and skills into agent config trees",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Regenerate agent artifacts from the canonical sources.
    Sync(SyncArgs),

    /// Check agent artifacts against the canonical sources without writing.
    Verify(VerifyArgs),

    /// Show unified diffs of what sync would change.
    Diff(DiffArgs),
}

// ---------------------------------------------------------------------------
// Shared category argument — parsed from CLI strings, converts to core type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `DocCategory` from CLI args.
#[derive(Debug, Clone)]
pub struct CategoryArg(pub DocCategory);

impl FromStr for CategoryArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rule" | "rules" => Ok(Self(DocCategory::Rule)),
            "workflow" | "workflows" => Ok(Self(DocCategory::Workflow)),
            "skill" | "skills" => Ok(Self(DocCategory::Skill)),
            other => Err(format!(
                "unknown category '{other}'; expected: rules, workflows, skills"
            )),
        }
    }
}

impl fmt::Display for CategoryArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<CategoryArg> for DocCategory {
    fn from(c: CategoryArg) -> Self {
        c.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Verify(args) => args.run(),
        Commands::Diff(args) => args.run(),
    }
}
