//! Agent registration in `.kittify/config.yaml`.
//!
//! A full bridge run records which assistants are wired up so the rest of
//! the Spec Kitty tooling can offer them. The config file is owned by that
//! tooling, not by the bridge, so edits here are surgical: only
//! `agents.available` and a default `agents.selection` block are touched,
//! every other key round-trips untouched.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;
use crate::paths::ProjectLayout;

/// Agents a full run registers, source-of-truth editor first.
pub const REGISTERED_AGENTS: &[&str] = &["windsurf", "claude", "antigravity", "gemini", "copilot"];

/// Update `agents.available` in the project config and return the final list.
///
/// Existing entries keep their order, entries not in [`REGISTERED_AGENTS`]
/// are dropped, and missing registered agents are appended. A default
/// `agents.selection` block is added only when none exists. The file is
/// created from scratch if absent.
pub fn register_agents_at(root: &Path) -> Result<Vec<String>, ConfigError> {
    let path = ProjectLayout::new(root).config_path();

    let mut doc = read_config(&path)?;
    let map = match doc {
        Value::Mapping(ref mut m) => m,
        _ => {
            return Err(ConfigError::NotAMapping {
                path,
                section: "config",
            })
        }
    };

    if !map.contains_key("agents") {
        map.insert(Value::from("agents"), Value::Mapping(Mapping::new()));
    }
    let agents = match map.get_mut("agents") {
        Some(Value::Mapping(m)) => m,
        _ => {
            return Err(ConfigError::NotAMapping {
                path,
                section: "agents",
            })
        }
    };

    let available = merged_available(agents);
    agents.insert(
        Value::from("available"),
        Value::Sequence(available.iter().map(|a| Value::from(a.as_str())).collect()),
    );

    if !agents.contains_key("selection") {
        agents.insert(Value::from("selection"), default_selection());
    }

    write_config(&path, &doc)?;
    tracing::info!("registered agents in {}: {}", path.display(), available.join(", "));
    Ok(available)
}

/// Current `available` entries that are still registered, in their existing
/// order, followed by any registered agent not yet listed.
fn merged_available(agents: &Mapping) -> Vec<String> {
    let current: Vec<String> = agents
        .get("available")
        .and_then(Value::as_sequence)
        .map(|seq| {
            seq.iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default();

    let mut merged: Vec<String> = current
        .into_iter()
        .filter(|a| REGISTERED_AGENTS.contains(&a.as_str()))
        .collect();
    for agent in REGISTERED_AGENTS {
        if !merged.iter().any(|a| a == agent) {
            merged.push((*agent).to_owned());
        }
    }
    merged
}

fn default_selection() -> Value {
    let mut selection = Mapping::new();
    selection.insert(Value::from("strategy"), Value::from("preferred"));
    selection.insert(Value::from("preferred_implementer"), Value::from("claude"));
    selection.insert(Value::from("preferred_reviewer"), Value::from("claude"));
    Value::Mapping(selection)
}

// ---------------------------------------------------------------------------
// File round-trip
// ---------------------------------------------------------------------------

fn read_config(path: &Path) -> Result<Value, ConfigError> {
    if !path.exists() {
        return Ok(Value::Mapping(Mapping::new()));
    }
    let contents = fs::read_to_string(path).map_err(|e| cfg_io_err(path, e))?;
    let doc: Value = serde_yaml::from_str(&contents).map_err(|e| yaml_err(path, e))?;
    // An empty file parses as null; treat it like a fresh config.
    if doc.is_null() {
        return Ok(Value::Mapping(Mapping::new()));
    }
    Ok(doc)
}

/// Write flow: serialize, `.yaml.tmp` sibling, `rename`.
fn write_config(path: &Path, doc: &Value) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| cfg_io_err(parent, e))?;
    }
    let yaml = serde_yaml::to_string(doc).map_err(|e| yaml_err(path, e))?;
    let tmp = path.with_extension("yaml.tmp");
    fs::write(&tmp, yaml).map_err(|e| cfg_io_err(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(cfg_io_err(path, e));
    }
    Ok(())
}

fn cfg_io_err(path: &Path, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn yaml_err(path: &Path, source: serde_yaml::Error) -> ConfigError {
    ConfigError::Yaml {
        path: PathBuf::from(path),
        source,
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_path(root: &Path) -> PathBuf {
        root.join(".kittify").join("config.yaml")
    }

    fn parse(root: &Path) -> Value {
        let text = fs::read_to_string(config_path(root)).unwrap();
        serde_yaml::from_str(&text).unwrap()
    }

    #[test]
    fn fresh_config_registers_all_agents() {
        let tmp = TempDir::new().unwrap();
        let available = register_agents_at(tmp.path()).unwrap();
        assert_eq!(available, REGISTERED_AGENTS);

        let doc = parse(tmp.path());
        let selection = &doc["agents"]["selection"];
        assert_eq!(selection["strategy"], Value::from("preferred"));
        assert_eq!(selection["preferred_implementer"], Value::from("claude"));
        assert_eq!(selection["preferred_reviewer"], Value::from("claude"));
    }

    #[test]
    fn existing_order_kept_unknown_dropped_missing_appended() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".kittify")).unwrap();
        fs::write(
            config_path(tmp.path()),
            "agents:\n  available:\n    - gemini\n    - legacy-agent\n    - claude\n",
        )
        .unwrap();

        let available = register_agents_at(tmp.path()).unwrap();
        assert_eq!(
            available,
            vec!["gemini", "claude", "windsurf", "antigravity", "copilot"]
        );
    }

    #[test]
    fn unrelated_keys_round_trip() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".kittify")).unwrap();
        fs::write(
            config_path(tmp.path()),
            "project_name: demo\nfeature_flags:\n  strict: true\n",
        )
        .unwrap();

        register_agents_at(tmp.path()).unwrap();
        let doc = parse(tmp.path());
        assert_eq!(doc["project_name"], Value::from("demo"));
        assert_eq!(doc["feature_flags"]["strict"], Value::from(true));
    }

    #[test]
    fn existing_selection_is_untouched() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".kittify")).unwrap();
        fs::write(
            config_path(tmp.path()),
            "agents:\n  selection:\n    strategy: round-robin\n",
        )
        .unwrap();

        register_agents_at(tmp.path()).unwrap();
        let doc = parse(tmp.path());
        assert_eq!(
            doc["agents"]["selection"]["strategy"],
            Value::from("round-robin")
        );
    }

    #[test]
    fn empty_file_treated_as_fresh_config() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".kittify")).unwrap();
        fs::write(config_path(tmp.path()), "").unwrap();

        let available = register_agents_at(tmp.path()).unwrap();
        assert_eq!(available.len(), REGISTERED_AGENTS.len());
    }

    #[test]
    fn non_mapping_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(".kittify")).unwrap();
        fs::write(config_path(tmp.path()), "- just\n- a list\n").unwrap();

        let err = register_agents_at(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotAMapping {
                section: "config",
                ..
            }
        ));
    }

    #[test]
    fn tmp_file_gone_after_write() {
        let tmp = TempDir::new().unwrap();
        register_agents_at(tmp.path()).unwrap();
        assert!(!config_path(tmp.path()).with_extension("yaml.tmp").exists());
    }

    #[test]
    fn second_run_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        register_agents_at(tmp.path()).unwrap();
        let first = fs::read_to_string(config_path(tmp.path())).unwrap();
        register_agents_at(tmp.path()).unwrap();
        let second = fs::read_to_string(config_path(tmp.path())).unwrap();
        assert_eq!(first, second);
    }
}
