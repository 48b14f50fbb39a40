use std::process::Command;

fn xtask() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xtask"))
}

#[test]
fn xtask_help_runs() {
    let output = xtask().arg("help").output().expect("run xtask");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
}

#[test]
fn explain_coverage_passes() {
    let output = xtask().arg("explain-coverage").output().expect("run xtask");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("16 check IDs have explanations"));
}

#[test]
fn print_schema_ids_lists_report_and_config() {
    let output = xtask().arg("print-schema-ids").output().expect("run xtask");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "releasegate.report.v1\nreleasegate.config.v1\n");
}

#[test]
fn validate_report_rejects_incomplete_report() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let path = tmp.path().join("report.json");
    std::fs::write(&path, r#"{"schema":"releasegate.report.v1"}"#).expect("write report");

    let output = xtask()
        .arg("validate-report")
        .arg(&path)
        .output()
        .expect("run xtask");
    assert!(!output.status.success());
}

#[test]
fn unknown_command_fails() {
    let output = xtask().arg("nope").output().expect("run xtask");
    assert!(!output.status.success());
}
