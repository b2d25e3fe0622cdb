//! `speckit-bridge verify` — integrity check of agent artifacts.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use bridge_sync::{verify, IssueKind, VerificationReport};
use bridge_transform::ProfileRegistry;

use super::{resolve_categories, resolve_root};
use crate::CategoryArg;

/// Arguments for `speckit-bridge verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Categories to verify (rules, workflows, skills). Omit for all.
    pub categories: Vec<CategoryArg>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// Project root. Defaults to the nearest ancestor containing `.kittify/`.
    #[arg(long)]
    pub root: Option<PathBuf>,
}

impl VerifyArgs {
    pub fn run(self) -> Result<()> {
        let root = resolve_root(self.root)?;
        let categories = resolve_categories(&self.categories);
        let registry = ProfileRegistry::standard();

        let report = verify(&root, &registry, &categories)
            .with_context(|| format!("verification failed for '{}'", root.display()))?;

        if self.json {
            print_json(&report)?;
        } else {
            print_table(&report);
        }

        if !report.is_clean() {
            bail!("verification found {} issue(s)", report.issues.len());
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct VerifyReportJson {
    summary: VerifySummaryJson,
    issues: Vec<IssueJson>,
}

#[derive(Serialize)]
struct VerifySummaryJson {
    documents: usize,
    expected_artifacts: usize,
    missing: usize,
    mismatched: usize,
    orphans: usize,
}

#[derive(Serialize)]
struct IssueJson {
    path: String,
    kind: String,
    detail: String,
}

#[derive(Tabled)]
struct IssueTableRow {
    #[tabled(rename = "path")]
    path: String,
    #[tabled(rename = "kind")]
    kind: String,
    #[tabled(rename = "detail")]
    detail: String,
}

fn documents_total(report: &VerificationReport) -> usize {
    report.documents_read.iter().map(|(_, n)| n).sum()
}

fn print_json(report: &VerificationReport) -> Result<()> {
    let payload = VerifyReportJson {
        summary: VerifySummaryJson {
            documents: documents_total(report),
            expected_artifacts: report.expected_artifacts,
            missing: report.count_of(IssueKind::Missing),
            mismatched: report.count_of(IssueKind::Mismatched),
            orphans: report.count_of(IssueKind::Orphan),
        },
        issues: report
            .issues
            .iter()
            .map(|issue| IssueJson {
                path: issue.path.display().to_string(),
                kind: issue.kind.to_string(),
                detail: issue.detail.clone(),
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize verify JSON")?
    );
    Ok(())
}

fn print_table(report: &VerificationReport) {
    println!(
        "Spec Kitty Bridge v{} | {} documents | {} artifacts expected",
        env!("CARGO_PKG_VERSION"),
        documents_total(report),
        report.expected_artifacts,
    );

    if report.is_clean() {
        println!("{} all artifacts match the canonical sources", "✓".green().bold());
        return;
    }

    println!(
        "{} {} missing, {} mismatched, {} orphan(s)",
        "✗".red().bold(),
        report.count_of(IssueKind::Missing),
        report.count_of(IssueKind::Mismatched),
        report.count_of(IssueKind::Orphan),
    );

    let rows: Vec<IssueTableRow> = report
        .issues
        .iter()
        .map(|issue| IssueTableRow {
            path: issue.path.display().to_string(),
            kind: issue.kind.to_string(),
            detail: issue.detail.clone(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!("Run 'speckit-bridge sync' to regenerate.");
}
