//! bronze.toml discovery and validation.

use crate::prelude::*;

#[test]
fn config_selects_kinds() {
    let temp = Project::python();
    temp.config("[run]\nkinds = [\"lint\"]\n");
    let json = temp.run().json(0);
    assert_eq!(json.check_names("python"), vec!["ruff"]);
}

#[test]
fn cli_flags_override_config() {
    let temp = Project::python();
    temp.config("[run]\nkinds = [\"lint\"]\n");
    let json = temp.run().args(&["--all"]).json(0);
    assert_eq!(
        json.check_names("python"),
        vec!["black", "ruff", "pytest-smoke"]
    );
}

#[test]
fn config_strict_mode() {
    let temp = Project::empty();
    temp.file("src/main.cpp", "int main() { return 0; }\n");
    temp.tool("clang-format", "exit 0");
    temp.tool("cppcheck", "exit 1");
    temp.config("[run]\nstrict = true\n");
    temp.run().fails();
}

#[test]
fn walk_excludes_hide_files_from_detection() {
    let temp = Project::python();
    temp.file("third_party/lib.sh", "echo hi\n");
    temp.config("[walk]\nexclude = [\"third_party/**\"]\n");
    let json = temp.run().json(0);
    assert_eq!(json.languages(), vec!["python"]);
}

#[test]
fn unknown_config_key_warns() {
    let temp = Project::python();
    temp.config("[run]\nflavor = \"mild\"\n");
    temp.run()
        .passes()
        .stderr_has("unrecognized field `run.flavor`");
}

#[test]
fn valid_config_produces_no_warnings() {
    let temp = Project::python();
    temp.config("[run]\ntimeout = \"30s\"\n");
    temp.run().passes().stderr_lacks("warning");
}

#[test]
fn missing_version_is_an_error() {
    let temp = Project::python();
    std::fs::write(temp.path().join("bronze.toml"), "[run]\nstrict = true\n").unwrap();
    temp.run()
        .exits(2)
        .stderr_has("missing required field: version");
}

#[test]
fn unsupported_version_is_an_error() {
    let temp = Project::python();
    temp.config("version = 7\n");
    temp.run().exits(2).stderr_has("unsupported config version");
}

#[test]
fn explicit_config_path() {
    let temp = Project::python();
    let config_dir = tempfile::tempdir().unwrap();
    let config_path = config_dir.path().join("custom.toml");
    std::fs::write(&config_path, "version = 1\n[run]\nkinds = [\"format\"]\n").unwrap();

    let json = temp
        .run()
        .args(&["-C", config_path.to_str().unwrap()])
        .json(0);
    assert_eq!(json.check_names("python"), vec!["black"]);
}

#[test]
fn explicit_config_from_env() {
    let temp = Project::python();
    let config_dir = tempfile::tempdir().unwrap();
    let config_path = config_dir.path().join("custom.toml");
    std::fs::write(&config_path, "version = 1\n[run]\nkinds = [\"format\"]\n").unwrap();

    let json = temp
        .run()
        .env("BRONZE_CONFIG", config_path.to_str().unwrap())
        .json(0);
    assert_eq!(json.check_names("python"), vec!["black"]);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp = Project::python();
    temp.run()
        .args(&["-C", "/nonexistent/bronze.toml"])
        .exits(2)
        .stderr_has("config file not found");
}
