//! # bridge-sync
//!
//! Clean-before-write sync orchestration plus the read-only auditors.
//!
//! Call [`run`] to regenerate every agent's artifacts from the source of
//! truth, [`verify`] to audit the tree without writing, and
//! [`diff_artifacts`] to see pending changes as unified diffs.

pub mod diff;
pub mod error;
pub mod orchestrator;
pub mod verify;
mod writer;

pub use diff::{diff_artifacts, FileDiff};
pub use error::SyncError;
pub use orchestrator::{
    run, sync_rules_only, sync_skills_only, AgentSyncOutcome, SyncReport, WriteResult,
};
pub use verify::{verify, Issue, IssueKind, VerificationReport};
