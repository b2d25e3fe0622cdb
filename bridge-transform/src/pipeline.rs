//! The transformation pipeline: documents in, artifacts out.
//!
//! Pure functions over in-memory values. Nothing here touches the
//! filesystem, which is what lets sync and verify share one definition of
//! "what should exist".

use bridge_core::types::{Artifact, SourceDocument};

use crate::recipe::{Recipe, Substitution, TransformMode};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Apply one recipe to a category's documents.
///
/// Per-document modes yield one artifact per document; concatenation yields
/// exactly one artifact even for zero documents (preamble only), so stale
/// merged files shrink rather than linger.
pub fn transform(docs: &[SourceDocument], recipe: &Recipe) -> Vec<Artifact> {
    debug_assert!(recipe.is_coherent(), "recipe arity/output mismatch");
    match &recipe.mode {
        TransformMode::DirectCopy | TransformMode::RenameExtension => docs
            .iter()
            .map(|doc| Artifact {
                path: recipe.output.for_doc(&doc.name),
                content: apply_substitutions(&doc.content, &recipe.substitutions),
            })
            .collect(),
        TransformMode::WrapInStructuredBlock => docs
            .iter()
            .map(|doc| Artifact {
                path: recipe.output.for_doc(&doc.name),
                content: command_envelope(doc, &recipe.substitutions),
            })
            .collect(),
        TransformMode::ConcatenateWithHeaders {
            preamble,
            heading_prefix,
        } => {
            let content = concatenate(docs, preamble, heading_prefix, &recipe.substitutions);
            vec![Artifact {
                path: recipe.output.owned_scope().to_path_buf(),
                content,
            }]
        }
    }
}

// ---------------------------------------------------------------------------
// Substitutions
// ---------------------------------------------------------------------------

/// Apply literal swaps in declaration order. Each pass scans the result of
/// the previous one, so markers are expected to be disjoint from
/// replacements.
pub fn apply_substitutions(content: &str, substitutions: &[Substitution]) -> String {
    let mut out = content.to_owned();
    for sub in substitutions {
        out = out.replace(&sub.marker, &sub.replacement);
    }
    out
}

// ---------------------------------------------------------------------------
// Concatenation
// ---------------------------------------------------------------------------

fn concatenate(
    docs: &[SourceDocument],
    preamble: &str,
    heading_prefix: &str,
    substitutions: &[Substitution],
) -> String {
    let mut out = String::from(preamble);
    for doc in docs {
        let body = apply_substitutions(&doc.content, substitutions);
        out.push_str(&format!(
            "## {heading_prefix}{}\n\n{body}\n\n---\n\n",
            doc.name
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// TOML command envelope (Gemini workflows)
// ---------------------------------------------------------------------------

/// Wrap a workflow as a Gemini CLI command file:
///
/// ```text
/// description = "…"
///
/// prompt = """
/// …
/// """
/// ```
///
/// The description comes from the document's YAML front matter, computed on
/// the raw content so substitutions cannot disturb it; without one the
/// fallback is `Executes <name>`.
fn command_envelope(doc: &SourceDocument, substitutions: &[Substitution]) -> String {
    let description = front_matter_description(&doc.content)
        .unwrap_or_else(|| format!("Executes {}", doc.name));
    let body = apply_substitutions(&doc.content, substitutions);
    format!(
        "description = \"{}\"\n\nprompt = \"\"\"\n{}\n\"\"\"\n",
        escape_basic_string(&description),
        escape_multiline_string(&body),
    )
}

/// `description:` value from a leading `---` front matter block, if any.
fn front_matter_description(content: &str) -> Option<String> {
    let rest = content.strip_prefix("---")?;
    let end = rest.find("---")?;
    for line in rest[..end].lines() {
        if let Some(value) = line.strip_prefix("description:") {
            return Some(value.trim().trim_matches('"').to_owned());
        }
    }
    None
}

/// Escaping for a single-line basic string: backslashes first, then quotes.
fn escape_basic_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escaping for a multi-line basic string. A literal `"""` inside the body
/// would terminate the block, so its final quote is escaped.
fn escape_multiline_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace("\"\"\"", "\"\"\\\"")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::OutputPath;
    use bridge_core::types::{DocCategory, DocName};
    use std::path::PathBuf;

    fn doc(name: &str, content: &str) -> SourceDocument {
        SourceDocument {
            category: DocCategory::Workflow,
            name: DocName::from(name),
            content: content.to_owned(),
        }
    }

    fn copy_recipe(subs: Vec<Substitution>) -> Recipe {
        Recipe {
            mode: TransformMode::DirectCopy,
            output: OutputPath::per_document("out", ".md"),
            substitutions: subs,
        }
    }

    #[test]
    fn direct_copy_preserves_bytes() {
        let docs = [doc("x", "exact content\nwith lines\n")];
        let artifacts = transform(&docs, &copy_recipe(vec![]));
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].path, PathBuf::from("out/x.md"));
        assert_eq!(artifacts[0].content, "exact content\nwith lines\n");
    }

    #[test]
    fn substitutions_apply_in_declaration_order() {
        let subs = vec![
            Substitution::new("alpha", "beta"),
            Substitution::new("beta", "gamma"),
        ];
        // The second pass sees the first pass's output.
        assert_eq!(apply_substitutions("alpha", &subs), "gamma");
    }

    #[test]
    fn absent_marker_is_a_no_op() {
        let subs = vec![Substitution::new("never-present", "x")];
        assert_eq!(apply_substitutions("content", &subs), "content");
    }

    #[test]
    fn concatenation_orders_and_frames_documents() {
        let docs = [
            doc("first", "Alpha body."),
            doc("second", "Beta body."),
        ];
        let recipe = Recipe {
            mode: TransformMode::ConcatenateWithHeaders {
                preamble: "# Heading\nIntro.\n\n".to_owned(),
                heading_prefix: "Rule: ".to_owned(),
            },
            output: OutputPath::fixed("merged.md"),
            substitutions: vec![],
        };
        let artifacts = transform(&docs, &recipe);
        assert_eq!(artifacts.len(), 1);
        assert_eq!(
            artifacts[0].content,
            "# Heading\nIntro.\n\n## Rule: first\n\nAlpha body.\n\n---\n\n## Rule: second\n\nBeta body.\n\n---\n\n"
        );
    }

    #[test]
    fn concatenating_zero_documents_leaves_the_preamble() {
        let recipe = Recipe {
            mode: TransformMode::ConcatenateWithHeaders {
                preamble: "# Only\n\n".to_owned(),
                heading_prefix: String::new(),
            },
            output: OutputPath::fixed("merged.md"),
            substitutions: vec![],
        };
        let artifacts = transform(&[], &recipe);
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].content, "# Only\n\n");
    }

    #[test]
    fn empty_document_still_produces_an_artifact() {
        let docs = [doc("empty", "")];
        let artifacts = transform(&docs, &copy_recipe(vec![]));
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].content, "");
    }

    // -- envelope ------------------------------------------------------------

    fn envelope_recipe() -> Recipe {
        Recipe {
            mode: TransformMode::WrapInStructuredBlock,
            output: OutputPath::per_document("cmd", ".toml"),
            substitutions: vec![],
        }
    }

    fn parse_envelope(content: &str) -> toml::Value {
        toml::from_str(content).unwrap_or_else(|e| panic!("invalid TOML: {e}\n{content}"))
    }

    #[test]
    fn envelope_lifts_front_matter_description() {
        let docs = [doc(
            "accept",
            "---\ndescription: \"Run acceptance\"\nother: x\n---\nBody text\n",
        )];
        let artifacts = transform(&docs, &envelope_recipe());
        let value = parse_envelope(&artifacts[0].content);
        assert_eq!(value["description"].as_str(), Some("Run acceptance"));
        let prompt = value["prompt"].as_str().unwrap();
        assert!(prompt.contains("Body text"));
    }

    #[test]
    fn envelope_falls_back_to_executes_name() {
        let docs = [doc("spec-kitty.review", "No front matter here.\n")];
        let artifacts = transform(&docs, &envelope_recipe());
        let value = parse_envelope(&artifacts[0].content);
        assert_eq!(
            value["description"].as_str(),
            Some("Executes spec-kitty.review")
        );
    }

    #[test]
    fn description_read_before_substitutions() {
        let subs = vec![Substitution::new("description", "DESCRIPTION")];
        let recipe = Recipe {
            substitutions: subs,
            ..envelope_recipe()
        };
        let docs = [doc("w", "---\ndescription: Original\n---\nbody description here\n")];
        let artifacts = transform(&docs, &recipe);
        let value = parse_envelope(&artifacts[0].content);
        // The lifted value is untouched even though the body was rewritten.
        assert_eq!(value["description"].as_str(), Some("Original"));
        assert!(value["prompt"].as_str().unwrap().contains("DESCRIPTION here"));
    }

    #[test]
    fn hostile_quotes_and_backslashes_stay_valid_toml() {
        let body = "Use \"\"\" fences and C:\\paths\\ everywhere.\nAlso a stray \" quote.\n";
        let docs = [doc(
            "hostile",
            &format!("---\ndescription: He said \"go\" \\ now\n---\n{body}"),
        )];
        let artifacts = transform(&docs, &envelope_recipe());
        let value = parse_envelope(&artifacts[0].content);
        assert_eq!(value["description"].as_str(), Some("He said \"go\" \\ now"));
        let prompt = value["prompt"].as_str().unwrap();
        assert!(prompt.contains("C:\\paths\\"), "got: {prompt}");
        assert!(prompt.contains("\"\"\""), "triple quote must survive round-trip, got: {prompt}");
    }

    #[test]
    fn envelope_shape_is_stable() {
        let docs = [doc("w", "body\n")];
        let artifacts = transform(&docs, &envelope_recipe());
        assert!(artifacts[0]
            .content
            .starts_with("description = \"Executes w\"\n\nprompt = \"\"\"\n"));
        assert!(artifacts[0].content.ends_with("\n\"\"\"\n"));
    }
}
