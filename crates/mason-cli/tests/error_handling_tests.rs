//! Exit-code and error-surface tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn mason() -> Command {
    let mut cmd = Command::cargo_bin("mason").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn no_arguments_shows_help_and_exits_2() {
    mason().assert().failure().code(2);
}

#[test]
fn unknown_module_kind_is_a_parse_error() {
    mason()
        .args(["new", "x", "--module", "frontend"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn invalid_project_name_names_the_rule() {
    let dir = tempfile::tempdir().unwrap();
    mason()
        .current_dir(dir.path())
        .args(["new", "MySite", "--defaults", "--yes"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("MySite"));
}

#[test]
fn malformed_group_id_fails_in_defaults_mode() {
    let dir = tempfile::tempdir().unwrap();
    mason()
        .current_dir(dir.path())
        .args([
            "new",
            "example",
            "--group-id",
            "not a group id",
            "--defaults",
            "--yes",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("groupId"));
}

#[test]
fn missing_group_id_fails_rather_than_guesses() {
    let dir = tempfile::tempdir().unwrap();
    // Unattended (no TTY) and no --defaults either: the first unresolved
    // property must fail loudly.
    mason()
        .current_dir(dir.path())
        .args(["new", "example", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("groupId"));
}

#[test]
fn existing_directory_is_refused_without_force() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("example")).unwrap();

    mason()
        .current_dir(dir.path())
        .args([
            "new",
            "example",
            "--group-id",
            "com.example",
            "--defaults",
            "--yes",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn add_outside_a_project_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    mason()
        .current_dir(dir.path())
        .args(["add", "tests-it", "--defaults", "--yes"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("No mason project"));
}

#[test]
fn unknown_config_key_is_a_config_error() {
    mason()
        .args(["config", "get", "does.not.exist"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn errors_carry_suggestions() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("example")).unwrap();

    mason()
        .current_dir(dir.path())
        .args([
            "new",
            "example",
            "--group-id",
            "com.example",
            "--defaults",
            "--yes",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Suggestions:"));
}
