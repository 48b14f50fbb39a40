use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the releasegate binary.
#[allow(deprecated)]
fn releasegate_cmd() -> Command {
    Command::cargo_bin("releasegate").unwrap()
}

#[test]
fn help_works() {
    releasegate_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("explain"))
        .stdout(predicate::str::contains("list-checks"));
}

#[test]
fn check_help_lists_flags() {
    releasegate_cmd()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--coverage-threshold"))
        .stdout(predicate::str::contains("--advisory-only"))
        .stdout(predicate::str::contains("--deadline-secs"));
}

#[test]
fn explain_known_check() {
    releasegate_cmd()
        .args(["explain", "changelog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation"));
}

#[test]
fn explain_unknown_check_exits_2() {
    releasegate_cmd()
        .args(["explain", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown check id: nope"))
        .stderr(predicate::str::contains("breaking-changes"));
}

#[test]
fn list_checks_for_one_type() {
    releasegate_cmd()
        .args(["list-checks", "--type", "go"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("go:\n"))
        .stdout(predicate::str::contains("go test -cover ./..."))
        .stdout(predicate::str::contains("python").not());
}

#[test]
fn unknown_type_is_a_usage_error() {
    releasegate_cmd()
        .args(["check", ".", "--type", "cobol"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown project type"));
}
