//! Sync orchestration: read once, transform per agent, clean, write.
//!
//! ## Run shape
//!
//! 1. Validate the profile registry (fail before touching anything).
//! 2. Load every requested category from the source of truth.
//! 3. Per agent: transform all categories first, then clean the owned
//!    scopes, then write the planned artifacts. An agent that fails is
//!    recorded in the report and the remaining agents still run.
//! 4. Full non-dry runs register the bridged agents in the project config;
//!    a registration failure downgrades to a warning because the artifacts
//!    themselves are already in place.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use bridge_core::store::SourceStore;
use bridge_core::types::{DocCategory, SourceDocument};
use bridge_core::{config, ProjectLayout};
use bridge_transform::{transform, AgentKind, AgentProfile, ProfileRegistry};

use crate::error::SyncError;
use crate::writer;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// Outcome of an individual artifact write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written. Path is relative to the project root.
    Written { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path } | WriteResult::WouldWrite { path } => path,
        }
    }
}

/// What happened to one agent during a run.
#[derive(Debug)]
pub struct AgentSyncOutcome {
    pub agent: AgentKind,
    pub writes: Vec<WriteResult>,
    /// Files removed by cleaning this agent's owned scopes.
    pub removed_files: usize,
    /// Set when this agent's clean or write step failed. Earlier writes for
    /// the agent may have landed; the error says where it stopped.
    pub error: Option<SyncError>,
}

impl AgentSyncOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a whole sync run.
#[derive(Debug)]
pub struct SyncReport {
    /// Documents read per category, in category order.
    pub documents_read: Vec<(DocCategory, usize)>,
    pub agents: Vec<AgentSyncOutcome>,
    /// `agents.available` after registration; empty when registration was
    /// skipped (dry runs and partial-category runs).
    pub registered_agents: Vec<String>,
    pub warnings: Vec<String>,
}

impl SyncReport {
    pub fn artifacts_written(&self) -> usize {
        self.agents.iter().map(|a| a.writes.len()).sum()
    }

    pub fn files_removed(&self) -> usize {
        self.agents.iter().map(|a| a.removed_files).sum()
    }

    pub fn failed_agents(&self) -> Vec<&AgentSyncOutcome> {
        self.agents.iter().filter(|a| !a.succeeded()).collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.agents.iter().all(AgentSyncOutcome::succeeded)
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Sync the requested categories for every profiled agent.
pub fn run(
    root: &Path,
    registry: &ProfileRegistry,
    categories: &[DocCategory],
    dry_run: bool,
) -> Result<SyncReport, SyncError> {
    registry.validate()?;
    let categories = normalize_categories(categories);

    let store = SourceStore::new(ProjectLayout::new(root));
    let documents = store.load_all(&categories)?;

    let mut agents = Vec::with_capacity(registry.profiles.len());
    for profile in &registry.profiles {
        agents.push(sync_agent(root, profile, &categories, &documents, dry_run));
    }

    let documents_read = categories
        .iter()
        .map(|c| (*c, documents.get(c).map_or(0, Vec::len)))
        .collect();

    let mut registered_agents = Vec::new();
    let mut warnings = Vec::new();
    let full_run = categories.len() == DocCategory::all().len();
    if !dry_run && full_run {
        match config::register_agents_at(root) {
            Ok(available) => registered_agents = available,
            Err(err) => {
                tracing::warn!("agent registration failed: {err}");
                warnings.push(format!("agent registration failed: {err}"));
            }
        }
    }

    Ok(SyncReport {
        documents_read,
        agents,
        registered_agents,
        warnings,
    })
}

/// Sync only rule documents; workflow and skill artifacts are untouched.
pub fn sync_rules_only(
    root: &Path,
    registry: &ProfileRegistry,
    dry_run: bool,
) -> Result<SyncReport, SyncError> {
    run(root, registry, &[DocCategory::Rule], dry_run)
}

/// Sync only skill documents; rule and workflow artifacts are untouched.
pub fn sync_skills_only(
    root: &Path,
    registry: &ProfileRegistry,
    dry_run: bool,
) -> Result<SyncReport, SyncError> {
    run(root, registry, &[DocCategory::Skill], dry_run)
}

// ---------------------------------------------------------------------------
// Per-agent step
// ---------------------------------------------------------------------------

fn sync_agent(
    root: &Path,
    profile: &AgentProfile,
    categories: &[DocCategory],
    documents: &BTreeMap<DocCategory, Vec<SourceDocument>>,
    dry_run: bool,
) -> AgentSyncOutcome {
    match sync_agent_inner(root, profile, categories, documents, dry_run) {
        Ok((writes, removed_files)) => AgentSyncOutcome {
            agent: profile.agent,
            writes,
            removed_files,
            error: None,
        },
        Err(err) => {
            tracing::warn!("sync failed for agent '{}': {err}", profile.agent);
            AgentSyncOutcome {
                agent: profile.agent,
                writes: Vec::new(),
                removed_files: 0,
                error: Some(err),
            }
        }
    }
}

fn sync_agent_inner(
    root: &Path,
    profile: &AgentProfile,
    categories: &[DocCategory],
    documents: &BTreeMap<DocCategory, Vec<SourceDocument>>,
    dry_run: bool,
) -> Result<(Vec<WriteResult>, usize), SyncError> {
    // Plan everything before deleting anything.
    let mut planned = Vec::new();
    let mut scopes = Vec::new();
    for category in categories {
        let Some(recipe) = profile.recipe(*category) else {
            // Registry validation runs first, so this cannot happen for a
            // standard run; custom registries go through the same gate.
            continue;
        };
        let docs = documents.get(category).map_or(&[][..], Vec::as_slice);
        planned.extend(transform(docs, recipe));
        scopes.push(recipe.owned_scope());
    }

    if dry_run {
        let writes = planned
            .into_iter()
            .map(|a| WriteResult::WouldWrite { path: a.path })
            .collect();
        return Ok((writes, 0));
    }

    let mut removed_files = 0;
    for scope in scopes {
        removed_files += writer::clean_scope(root, scope)?;
    }

    let mut writes = Vec::with_capacity(planned.len());
    for artifact in planned {
        writer::atomic_write(&root.join(&artifact.path), &artifact.content)?;
        writes.push(WriteResult::Written {
            path: artifact.path,
        });
    }
    tracing::debug!(
        "agent '{}': {} written, {} removed",
        profile.agent,
        writes.len(),
        removed_files
    );
    Ok((writes, removed_files))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sorted, de-duplicated category list; keeps runs deterministic no matter
/// how the caller ordered its arguments.
pub(crate) fn normalize_categories(categories: &[DocCategory]) -> Vec<DocCategory> {
    categories
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
