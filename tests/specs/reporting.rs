//! The `--report` file and run idempotence.

use crate::prelude::*;

#[test]
fn report_file_matches_stdout_json() {
    let temp = Project::python();
    let report_dir = tempfile::tempdir().unwrap();
    let report_path = report_dir.path().join("bronze-report.json");

    let stdout = temp
        .run()
        .args(&["--report", report_path.to_str().unwrap()])
        .json(0);

    let bytes = std::fs::read(&report_path).unwrap();
    let file = ReportJson::new(&bytes);
    assert_eq!(file.stable(), stdout.stable());
}

#[test]
fn report_file_written_on_failure() {
    let temp = Project::python();
    temp.tool("ruff", "exit 1");
    let report_dir = tempfile::tempdir().unwrap();
    let report_path = report_dir.path().join("report.json");

    temp.run()
        .args(&["--report", report_path.to_str().unwrap()])
        .fails();

    let file = ReportJson::new(&std::fs::read(&report_path).unwrap());
    assert_eq!(file.verdict(), "fail");
}

#[test]
fn unwritable_report_is_an_internal_error() {
    let temp = Project::python();
    let report_path = temp.path().join("missing-dir").join("report.json");

    temp.run()
        .args(&["--report", report_path.to_str().unwrap()])
        .exits(2)
        .stderr_has("bronze: ")
        .stderr_has("report.json");
}

#[test]
fn repeated_runs_produce_the_same_report() {
    let temp = Project::python();
    temp.file("pubspec.yaml", "name: app\n");
    temp.file("lib/main.dart", "void main() {}\n");
    temp.tool("dart", "exit 0");
    temp.tool("ruff", "echo 'app/main.py:1:1: E501'; exit 1");

    let first = temp.run().json(1).stable();
    let second = temp.run().json(1).stable();
    assert_eq!(first, second);
}

#[test]
fn jobs_do_not_change_the_report() {
    let temp = Project::python();
    temp.file("scripts/build.sh", "echo hi\n");
    temp.tool("shfmt", "exit 0");
    temp.tool("shellcheck", "exit 1");

    let serial = temp.run().args(&["--jobs", "1"]).json(1).stable();
    let parallel = temp.run().args(&["--jobs", "4"]).json(1).stable();
    assert_eq!(serial, parallel);
}
