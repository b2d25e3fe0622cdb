//! Reading the canonical source of truth.
//!
//! Rules and workflows are flat markdown collections (recursive, keyed by
//! file stem). Skills are one directory per skill with a `SKILL.md` manifest
//! inside, keyed by directory name. Every load returns documents sorted by
//! name so downstream output is deterministic.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{io_err, SourceError};
use crate::paths::ProjectLayout;
use crate::types::{DocCategory, DocName, SourceDocument};

/// File name of the manifest inside each skill directory.
pub const SKILL_MANIFEST: &str = "SKILL.md";

/// Loads canonical documents from a project's source tree.
#[derive(Debug, Clone)]
pub struct SourceStore {
    layout: ProjectLayout,
}

impl SourceStore {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Load every document of one category, sorted by name.
    ///
    /// A missing source directory is `SourceError::SourceMissing`; an empty
    /// one loads as zero documents.
    pub fn load(&self, category: DocCategory) -> Result<Vec<SourceDocument>, SourceError> {
        let docs = match category {
            DocCategory::Rule | DocCategory::Workflow => self.load_flat_markdown(category)?,
            DocCategory::Skill => self.load_skills()?,
        };
        tracing::debug!(
            "loaded {} {} document(s) from {}",
            docs.len(),
            category,
            self.layout.source_dir(category).display()
        );
        Ok(docs)
    }

    /// Load several categories at once, keyed by category.
    pub fn load_all(
        &self,
        categories: &[DocCategory],
    ) -> Result<BTreeMap<DocCategory, Vec<SourceDocument>>, SourceError> {
        let mut out = BTreeMap::new();
        for category in categories {
            out.insert(*category, self.load(*category)?);
        }
        Ok(out)
    }

    // -----------------------------------------------------------------------
    // Category readers
    // -----------------------------------------------------------------------

    /// Rules and workflows: every `*.md` under the category directory,
    /// recursively, named by file stem.
    fn load_flat_markdown(
        &self,
        category: DocCategory,
    ) -> Result<Vec<SourceDocument>, SourceError> {
        let dir = self.layout.source_dir(category);
        if !dir.is_dir() {
            return Err(SourceError::SourceMissing {
                category,
                path: dir,
            });
        }

        let mut files = Vec::new();
        collect_files(&dir, &mut files)?;
        files.sort();

        let mut docs: BTreeMap<DocName, SourceDocument> = BTreeMap::new();
        for path in files {
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let name = DocName::from(stem);
            if docs.contains_key(&name) {
                return Err(SourceError::DuplicateName {
                    category,
                    name,
                    path,
                });
            }
            let content = read_normalized(&path)?;
            docs.insert(
                name.clone(),
                SourceDocument {
                    category,
                    name,
                    content,
                },
            );
        }
        Ok(docs.into_values().collect())
    }

    /// Skills: one directory per skill, manifest at `<name>/SKILL.md`.
    /// A directory without a manifest is not a skill yet; skip it loudly.
    fn load_skills(&self) -> Result<Vec<SourceDocument>, SourceError> {
        let dir = self.layout.source_dir(DocCategory::Skill);
        if !dir.is_dir() {
            return Err(SourceError::SourceMissing {
                category: DocCategory::Skill,
                path: dir,
            });
        }

        let mut entries: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|e| io_err(&dir, e))? {
            let entry = entry.map_err(|e| io_err(&dir, e))?;
            entries.push(entry.path());
        }
        entries.sort();

        let mut docs = Vec::new();
        for entry in entries {
            if !entry.is_dir() {
                continue;
            }
            let manifest = entry.join(SKILL_MANIFEST);
            if !manifest.is_file() {
                tracing::warn!(
                    "skill directory without {} skipped: {}",
                    SKILL_MANIFEST,
                    entry.display()
                );
                continue;
            }
            let Some(name) = entry.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            docs.push(SourceDocument {
                category: DocCategory::Skill,
                name: DocName::from(name),
                content: read_normalized(&manifest)?,
            });
        }
        Ok(docs)
    }
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), SourceError> {
    for entry in fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
        if file_type.is_dir() {
            collect_files(&path, out)?;
        } else if file_type.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn read_normalized(path: &Path) -> Result<String, SourceError> {
    let raw = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    Ok(raw.replace("\r\n", "\n"))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
