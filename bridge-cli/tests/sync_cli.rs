use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn bridge_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("speckit-bridge"))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn seed_project(root: &Path) {
    write(root, ".kittify/memory/constitution.md", "X");
    write(
        root,
        ".windsurf/workflows/spec-kitty.accept.md",
        "---\ndescription: \"Accept a work package\"\n---\nRun `(Missing script command for sh) accept --actor \"windsurf\"` with $ARGUMENTS.\n",
    );
    write(root, ".kittify/skills/tdd/SKILL.md", "# TDD\nRed, green, refactor.\n");
}

#[test]
fn full_sync_writes_all_agent_trees() {
    let project = TempDir::new().unwrap();
    seed_project(project.path());

    bridge_cmd()
        .args(["sync", "--root"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(contains("synced"))
        .stdout(contains("registered agents:"));

    let rule = project.path().join(".agent/rules/constitution.md");
    assert_eq!(fs::read(&rule).unwrap(), b"X", "direct copy must be byte exact");

    assert!(project.path().join(".claude/CLAUDE.md").is_file());
    assert!(project.path().join(".claude/commands/spec-kitty.accept.md").is_file());
    assert!(project.path().join("GEMINI.md").is_file());
    assert!(project.path().join(".github/copilot-instructions.md").is_file());
    assert!(project.path().join(".github/prompts/spec-kitty.accept.prompt.md").is_file());

    let gemini_command = fs::read_to_string(
        project.path().join(".gemini/commands/spec-kitty.accept.toml"),
    )
    .unwrap();
    assert!(gemini_command.contains("{{args}}"), "gemini args placeholder missing");
    assert!(!gemini_command.contains("$ARGUMENTS"), "raw args marker leaked");
}

#[test]
fn dry_run_reports_writes_and_touches_nothing() {
    let project = TempDir::new().unwrap();
    seed_project(project.path());

    bridge_cmd()
        .args(["sync", "--dry-run", "--root"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(contains("[dry-run]"))
        .stdout(contains("CLAUDE.md"));

    for artifact in [".agent", ".claude", ".gemini", ".github", "GEMINI.md"] {
        assert!(
            !project.path().join(artifact).exists(),
            "dry-run must not create {artifact}"
        );
    }
    assert!(
        !project.path().join(".kittify/config.yaml").exists(),
        "dry-run must not register agents"
    );
}

#[test]
fn rules_only_sync_preserves_workflow_artifacts() {
    let project = TempDir::new().unwrap();
    seed_project(project.path());

    bridge_cmd()
        .args(["sync", "--root"])
        .arg(project.path())
        .assert()
        .success();

    let workflow_artifact = project.path().join(".claude/commands/spec-kitty.accept.md");
    let before = fs::read(&workflow_artifact).unwrap();

    write(project.path(), ".kittify/memory/constitution.md", "Y");
    bridge_cmd()
        .args(["sync", "rules", "--root"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(contains("read 1 rule document(s)"));

    assert_eq!(
        fs::read(&workflow_artifact).unwrap(),
        before,
        "rules-only sync must not rewrite workflow artifacts"
    );
    assert_eq!(
        fs::read(project.path().join(".agent/rules/constitution.md")).unwrap(),
        b"Y"
    );
}

#[test]
fn missing_workflow_directory_fails_with_guidance() {
    let project = TempDir::new().unwrap();
    write(project.path(), ".kittify/memory/constitution.md", "X");
    write(project.path(), ".kittify/skills/tdd/SKILL.md", "# TDD\n");

    bridge_cmd()
        .args(["sync", "--root"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(contains(".windsurf"))
        .stderr(contains("spec-kitty init"));

    assert!(
        !project.path().join(".agent").exists(),
        "a failed load must not clean or write anything"
    );
}

#[test]
fn unknown_category_is_rejected() {
    let project = TempDir::new().unwrap();
    seed_project(project.path());

    bridge_cmd()
        .args(["sync", "nonsense", "--root"])
        .arg(project.path())
        .assert()
        .failure()
        .stderr(contains("unknown category 'nonsense'"));
}
