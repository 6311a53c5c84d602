//! End-to-end CLI tests
//!
//! Mirrors the behavior matrix of the folding modes: markers appear exactly
//! when the CI environment (or an explicit override) says they should, and
//! begin/end marks stay balanced even when the wrapped command fails.

use assert_cmd::Command;
use predicates::prelude::*;

/// A command with all CI detection variables scrubbed, so the host
/// environment (e.g. this test suite itself running in CI) cannot leak in.
fn ci_fold() -> Command {
    let mut cmd = Command::cargo_bin("ci-fold").unwrap();
    for var in [
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "TRAVIS",
        "CI_FOLD",
        "CI_FOLD_PLATFORM",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn wrap_folds_under_gitlab_env() {
    ci_fold()
        .env("GITLAB_CI", "true")
        .arg("wrap")
        .write_stdin("boo!\n")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)section_start:.*boo!.*section_end:").unwrap());
}

#[test]
fn wrap_is_passthrough_without_ci_env() {
    ci_fold()
        .arg("wrap")
        .write_stdin("boo!\n")
        .assert()
        .success()
        .stdout("boo!\n");
}

#[test]
fn wrap_passthrough_is_byte_identical() {
    // No trailing newline on the input: none on the output either.
    ci_fold()
        .arg("wrap")
        .write_stdin("no newline at EOL")
        .assert()
        .success()
        .stdout("no newline at EOL");
}

#[test]
fn wrap_never_mode_disables_folding_in_ci() {
    ci_fold()
        .env("GITLAB_CI", "true")
        .args(["wrap", "--fold=never"])
        .write_stdin("boo!\n")
        .assert()
        .success()
        .stdout("boo!\n");
}

#[test]
fn wrap_always_mode_folds_outside_ci() {
    // No recognized CI: the forced fold falls back to GitLab syntax.
    ci_fold()
        .args(["wrap", "--fold=always"])
        .write_stdin("boo!\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("section_start:"))
        .stdout(predicate::str::contains("section_end:"));
}

#[test]
fn wrap_empty_input_is_not_folded() {
    ci_fold()
        .args(["wrap", "--fold=always"])
        .write_stdin("")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn wrap_emits_balanced_marks_in_order() {
    ci_fold()
        .args(["wrap", "--fold=always", "--platform=travis"])
        .write_stdin("in section\n")
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(
                r"\Atravis_fold:start:cf-\d+\.output\.0\nin section\ntravis_fold:end:cf-\d+\.output\.0\n\z",
            )
            .unwrap(),
        );
}

#[test]
fn wrap_reads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("captured.log");
    std::fs::write(&path, "from file\n").unwrap();

    ci_fold()
        .args(["wrap", "--fold=always", "--platform=travis", "--name", "logs"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("travis_fold:start:"))
        .stdout(predicate::str::contains(".logs.0"))
        .stdout(predicate::str::contains("from file"));
}

#[test]
fn wrap_missing_file_reports_hint() {
    ci_fold()
        .args(["wrap", "--fold=always", "no-such-file.log"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("ERROR:"))
        .stderr(predicate::str::contains("HINT:"));
}

#[test]
fn run_wraps_child_output() {
    ci_fold()
        .args([
            "run",
            "--fold=always",
            "--platform=travis",
            "--name",
            "build",
            "--",
            "echo",
            "hi",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(
                r"\Atravis_fold:start:cf-\d+\.build\.0\nhi\ntravis_fold:end:cf-\d+\.build\.0\n\z",
            )
            .unwrap(),
        );
}

#[test]
fn run_without_folding_leaves_output_untouched() {
    ci_fold()
        .args(["run", "--", "echo", "hi"])
        .assert()
        .success()
        .stdout("hi\n");
}

#[test]
fn run_propagates_exit_code_and_closes_section() {
    ci_fold()
        .args([
            "run",
            "--fold=always",
            "--platform=travis",
            "--",
            "sh",
            "-c",
            "echo doomed; exit 7",
        ])
        .assert()
        .code(7)
        .stdout(
            predicate::str::is_match(
                r"\Atravis_fold:start:cf-\d+\.output\.0\ndoomed\ntravis_fold:end:cf-\d+\.output\.0\n\z",
            )
            .unwrap(),
        );
}

#[test]
fn run_missing_command_reports_hint() {
    ci_fold()
        .args(["run", "--", "definitely-not-a-real-command-xyz"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Command not found"))
        .stderr(predicate::str::contains("HINT:"));
}

#[test]
fn check_active_under_gitlab_env() {
    ci_fold()
        .env("GITLAB_CI", "true")
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("GitLab CI"))
        .stdout(predicate::str::contains("active"));
}

#[test]
fn check_inactive_outside_ci() {
    ci_fold()
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("inactive"));
}

#[test]
fn check_honors_fold_env_var() {
    ci_fold()
        .env("CI_FOLD", "always")
        .arg("check")
        .assert()
        .success();
}
