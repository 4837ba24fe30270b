//! Check selection and output flags.

use crate::prelude::*;

#[test]
fn kind_flag_runs_only_that_kind() {
    let temp = Project::python();
    let json = temp.run().args(&["--lint"]).json(0);
    assert_eq!(json.check_names("python"), vec!["ruff"]);
}

#[test]
fn kind_flags_combine() {
    let temp = Project::python();
    let json = temp.run().args(&["--check-format", "--smoke-test"]).json(0);
    assert_eq!(json.check_names("python"), vec!["black", "pytest-smoke"]);
}

#[test]
fn all_conflicts_with_kind_flags() {
    let temp = Project::python();
    temp.run().args(&["--all", "--lint"]).exits(2);
}

#[test]
fn language_flag_restricts_languages() {
    let temp = Project::python();
    temp.file("scripts/build.sh", "#!/bin/sh\necho hi\n");
    temp.tool("shfmt", "exit 0");
    temp.tool("shellcheck", "exit 0");

    let all = temp.run().json(0);
    assert_eq!(all.languages(), vec!["python", "shell"]);

    let only = temp.run().args(&["--language", "shell"]).json(0);
    assert_eq!(only.languages(), vec!["shell"]);
}

#[test]
fn unknown_language_is_a_usage_error() {
    let temp = Project::python();
    temp.run().args(&["--language", "cobol"]).exits(2);
}

#[test]
fn zero_timeout_is_rejected() {
    let temp = Project::python();
    temp.run()
        .args(&["--timeout", "0"])
        .exits(2)
        .stderr_has("greater than zero");
}

#[test]
fn list_prints_plan_without_running_tools() {
    let temp = Project::python();
    // Would fail if actually run.
    temp.tool("ruff", "exit 1");

    temp.run()
        .args(&["--list"])
        .passes()
        .stdout_has("python (1 file under")
        .stdout_has("ruff")
        .stdout_has("pytest-smoke")
        .stdout_lacks("FAIL");
}

#[test]
fn detect_prints_languages_without_running_tools() {
    let temp = Project::python();
    temp.file("scripts/build.sh", "#!/bin/sh\necho hi\n");
    // Would fail if actually run.
    temp.tool("ruff", "exit 1");

    let stdout = temp.run().args(&["--detect"]).passes().stdout();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json, serde_json::json!({ "languages": ["python", "shell"] }));
}

#[test]
fn detect_on_empty_tree_lists_nothing() {
    let temp = Project::empty();
    temp.file("README.md", "# app\n");

    let stdout = temp.run().args(&["--detect"]).passes().stdout();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["languages"], serde_json::json!([]));
}

#[test]
fn no_color_env_disables_color() {
    let temp = Project::python();
    temp.tool("ruff", "echo 'app/main.py:1:1: F401'; exit 1");
    temp.run()
        .env("NO_COLOR", "1")
        .fails()
        .stdout_lacks("\x1b[");
}

#[test]
fn color_env_forces_color() {
    let temp = Project::python();
    temp.run().env("COLOR", "1").passes().stdout_has("\x1b[");
}

#[test]
fn no_color_flag_beats_color_env() {
    let temp = Project::python();
    temp.run()
        .args(&["--no-color"])
        .env("COLOR", "1")
        .passes()
        .stdout_lacks("\x1b[");
}

#[test]
fn json_output_is_parseable() {
    let temp = Project::python();
    let json = temp.run().json(0);
    assert_eq!(json.verdict(), "pass");
    assert!(json.value()["generatedAt"].is_string());
    assert!(json.value()["durationMs"].is_u64());
}
