//! Agent profiles — [`AgentKind`] and the standard [`ProfileRegistry`].
//!
//! # Destination mapping
//!
//! | Agent       | Rules                                | Workflows                          | Skills                          |
//! |-------------|--------------------------------------|------------------------------------|---------------------------------|
//! | Antigravity | `.agent/rules/<name>.md`             | `.agent/workflows/<name>.md`       | `.agent/skills/<name>/SKILL.md` |
//! | Claude      | `.claude/CLAUDE.md` (merged)         | `.claude/commands/<name>.md`       | `.claude/skills/<name>/SKILL.md`|
//! | Gemini      | `GEMINI.md` (merged)                 | `.gemini/commands/<name>.toml`     | `.gemini/skills.md` (merged)    |
//! | Copilot     | `.github/copilot-instructions.md` (merged) | `.github/prompts/<name>.prompt.md` | `.github/skills.md` (merged) |
//!
//! Workflows carry the canonical editor's invocation syntax, so every
//! workflow recipe rewrites the `--actor "windsurf"` flag to the target
//! agent and repairs the script placeholder the exporter leaves behind.
//! Gemini additionally swaps `$ARGUMENTS` for its `{{args}}` syntax.

use std::collections::BTreeMap;
use std::fmt;

use bridge_core::types::DocCategory;

use crate::error::ProfileError;
use crate::recipe::{OutputPath, Recipe, Substitution, TransformMode};

// ---------------------------------------------------------------------------
// Substitution markers
// ---------------------------------------------------------------------------

/// Placeholder the workflow exporter emits where a shell entry point belongs.
pub const SCRIPT_MARKER: &str = "(Missing script command for sh)";

/// What the placeholder becomes everywhere.
pub const SCRIPT_COMMAND: &str = "spec-kitty";

/// The canonical editor's actor flag, rewritten per target agent.
pub const WINDSURF_ACTOR_FLAG: &str = "--actor \"windsurf\"";

/// Gemini command argument syntax.
pub const GEMINI_ARGS_MARKER: &str = "$ARGUMENTS";
pub const GEMINI_ARGS_PLACEHOLDER: &str = "{{args}}";

// ---------------------------------------------------------------------------
// AgentKind
// ---------------------------------------------------------------------------

/// All assistants the bridge maintains configuration for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgentKind {
    Antigravity,
    Claude,
    Gemini,
    Copilot,
}

impl AgentKind {
    /// All agent variants, in the order runs process them.
    pub fn all() -> &'static [AgentKind] {
        &[
            AgentKind::Antigravity,
            AgentKind::Claude,
            AgentKind::Gemini,
            AgentKind::Copilot,
        ]
    }

    /// The value this agent's workflows pass to `--actor`.
    pub fn actor(&self) -> &'static str {
        match self {
            AgentKind::Antigravity => "antigravity",
            AgentKind::Claude => "claude",
            AgentKind::Gemini => "gemini",
            AgentKind::Copilot => "copilot",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.actor())
    }
}

// ---------------------------------------------------------------------------
// AgentProfile
// ---------------------------------------------------------------------------

/// One agent's full set of recipes, one per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    pub agent: AgentKind,
    pub recipes: BTreeMap<DocCategory, Recipe>,
}

impl AgentProfile {
    pub fn recipe(&self, category: DocCategory) -> Option<&Recipe> {
        self.recipes.get(&category)
    }
}

// ---------------------------------------------------------------------------
// ProfileRegistry
// ---------------------------------------------------------------------------

/// The set of profiles a run maintains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRegistry {
    pub profiles: Vec<AgentProfile>,
}

impl ProfileRegistry {
    /// The built-in mapping from the table above.
    pub fn standard() -> Self {
        Self {
            profiles: vec![antigravity(), claude(), gemini(), copilot()],
        }
    }

    /// Every profile must cover every category before anything is cleaned
    /// or written.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for profile in &self.profiles {
            for category in DocCategory::all() {
                if profile.recipe(*category).is_none() {
                    return Err(ProfileError::ProfileIncomplete {
                        agent: profile.agent,
                        category: *category,
                    });
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Standard profiles
// ---------------------------------------------------------------------------

fn workflow_substitutions(agent: AgentKind) -> Vec<Substitution> {
    let mut subs = vec![
        Substitution::new(SCRIPT_MARKER, SCRIPT_COMMAND),
        Substitution::new(
            WINDSURF_ACTOR_FLAG,
            format!("--actor \"{}\"", agent.actor()),
        ),
    ];
    if agent == AgentKind::Gemini {
        subs.push(Substitution::new(GEMINI_ARGS_MARKER, GEMINI_ARGS_PLACEHOLDER));
    }
    subs
}

fn merged(preamble: &str, heading_prefix: &str, path: &str) -> Recipe {
    Recipe {
        mode: TransformMode::ConcatenateWithHeaders {
            preamble: preamble.to_owned(),
            heading_prefix: heading_prefix.to_owned(),
        },
        output: OutputPath::fixed(path),
        substitutions: vec![],
    }
}

fn copied(dir: &str, suffix: &str, substitutions: Vec<Substitution>) -> Recipe {
    Recipe {
        mode: TransformMode::DirectCopy,
        output: OutputPath::per_document(dir, suffix),
        substitutions,
    }
}

fn antigravity() -> AgentProfile {
    let mut recipes = BTreeMap::new();
    recipes.insert(DocCategory::Rule, copied(".agent/rules", ".md", vec![]));
    recipes.insert(
        DocCategory::Workflow,
        copied(
            ".agent/workflows",
            ".md",
            workflow_substitutions(AgentKind::Antigravity),
        ),
    );
    recipes.insert(DocCategory::Skill, copied(".agent/skills", "/SKILL.md", vec![]));
    AgentProfile {
        agent: AgentKind::Antigravity,
        recipes,
    }
}

fn claude() -> AgentProfile {
    let mut recipes = BTreeMap::new();
    recipes.insert(
        DocCategory::Rule,
        merged(
            "# Claude Assistant Instructions\nManaged by Spec Kitty Bridge.\n\n",
            "",
            ".claude/CLAUDE.md",
        ),
    );
    recipes.insert(
        DocCategory::Workflow,
        copied(
            ".claude/commands",
            ".md",
            workflow_substitutions(AgentKind::Claude),
        ),
    );
    recipes.insert(DocCategory::Skill, copied(".claude/skills", "/SKILL.md", vec![]));
    AgentProfile {
        agent: AgentKind::Claude,
        recipes,
    }
}

fn gemini() -> AgentProfile {
    let mut recipes = BTreeMap::new();
    recipes.insert(
        DocCategory::Rule,
        merged(
            "# Gemini CLI Instructions\nManaged by Spec Kitty Bridge.\n\n",
            "",
            "GEMINI.md",
        ),
    );
    recipes.insert(
        DocCategory::Workflow,
        Recipe {
            mode: TransformMode::WrapInStructuredBlock,
            output: OutputPath::per_document(".gemini/commands", ".toml"),
            substitutions: workflow_substitutions(AgentKind::Gemini),
        },
    );
    recipes.insert(
        DocCategory::Skill,
        merged(
            "# Gemini CLI Skills\nManaged by Spec Kitty Bridge.\n\n",
            "Skill: ",
            ".gemini/skills.md",
        ),
    );
    AgentProfile {
        agent: AgentKind::Gemini,
        recipes,
    }
}

fn copilot() -> AgentProfile {
    let mut recipes = BTreeMap::new();
    recipes.insert(
        DocCategory::Rule,
        merged(
            "# Copilot Instructions\n> Managed by Spec Kitty Bridge.\n\n",
            "Rule: ",
            ".github/copilot-instructions.md",
        ),
    );
    recipes.insert(
        DocCategory::Workflow,
        Recipe {
            mode: TransformMode::RenameExtension,
            output: OutputPath::per_document(".github/prompts", ".prompt.md"),
            substitutions: workflow_substitutions(AgentKind::Copilot),
        },
    );
    recipes.insert(
        DocCategory::Skill,
        merged(
            "# Copilot Skills\n> Managed by Spec Kitty Bridge.\n\n",
            "Skill: ",
            ".github/skills.md",
        ),
    );
    AgentProfile {
        agent: AgentKind::Copilot,
        recipes,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::Path;

    #[test]
    fn standard_registry_is_complete() {
        ProfileRegistry::standard().validate().expect("complete");
    }

    #[test]
    fn standard_registry_covers_four_agents_in_order() {
        let registry = ProfileRegistry::standard();
        let agents: Vec<AgentKind> = registry.profiles.iter().map(|p| p.agent).collect();
        assert_eq!(agents, AgentKind::all());
    }

    #[test]
    fn every_standard_recipe_is_coherent() {
        let registry = ProfileRegistry::standard();
        for profile in &registry.profiles {
            for (category, recipe) in &profile.recipes {
                assert!(
                    recipe.is_coherent(),
                    "incoherent recipe for {} / {category}",
                    profile.agent
                );
            }
        }
    }

    #[test]
    fn owned_scopes_never_collide() {
        let registry = ProfileRegistry::standard();
        let mut scopes = BTreeSet::new();
        for profile in &registry.profiles {
            for recipe in profile.recipes.values() {
                assert!(
                    scopes.insert(recipe.owned_scope().to_path_buf()),
                    "scope claimed twice: {}",
                    recipe.owned_scope().display()
                );
            }
        }
        assert_eq!(scopes.len(), 12);
    }

    #[test]
    fn workflow_substitutions_target_each_actor() {
        let registry = ProfileRegistry::standard();
        for profile in &registry.profiles {
            let recipe = profile.recipe(DocCategory::Workflow).unwrap();
            let actor_sub = recipe
                .substitutions
                .iter()
                .find(|s| s.marker == WINDSURF_ACTOR_FLAG)
                .expect("actor substitution");
            assert_eq!(
                actor_sub.replacement,
                format!("--actor \"{}\"", profile.agent.actor())
            );
        }
    }

    #[test]
    fn only_gemini_rewrites_arguments_syntax() {
        let registry = ProfileRegistry::standard();
        for profile in &registry.profiles {
            let recipe = profile.recipe(DocCategory::Workflow).unwrap();
            let has_args = recipe
                .substitutions
                .iter()
                .any(|s| s.marker == GEMINI_ARGS_MARKER);
            assert_eq!(has_args, profile.agent == AgentKind::Gemini);
        }
    }

    #[test]
    fn rules_and_skills_carry_no_substitutions() {
        let registry = ProfileRegistry::standard();
        for profile in &registry.profiles {
            for category in [DocCategory::Rule, DocCategory::Skill] {
                assert!(
                    profile.recipe(category).unwrap().substitutions.is_empty(),
                    "{} {category} recipe must not rewrite content",
                    profile.agent
                );
            }
        }
    }

    #[test]
    fn gemini_rules_land_at_project_root() {
        let registry = ProfileRegistry::standard();
        let gemini = &registry.profiles[2];
        assert_eq!(gemini.agent, AgentKind::Gemini);
        let recipe = gemini.recipe(DocCategory::Rule).unwrap();
        assert_eq!(recipe.owned_scope(), Path::new("GEMINI.md"));
    }

    #[test]
    fn incomplete_profile_fails_validation() {
        let mut registry = ProfileRegistry::standard();
        registry.profiles[1].recipes.remove(&DocCategory::Skill);
        let err = registry.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("claude"), "got: {msg}");
        assert!(msg.contains("skill"), "got: {msg}");
    }
}
