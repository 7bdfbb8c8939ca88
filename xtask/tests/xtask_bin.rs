use std::process::Command;

fn xtask(arg: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_xtask"))
        .arg(arg)
        .output()
        .expect("run xtask")
}

#[test]
fn xtask_help_runs() {
    let output = xtask("help");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
}

#[test]
fn xtask_lists_schema_ids() {
    let output = xtask("print-schema-ids");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("driftguard.report.v1"));
    assert!(stdout.contains("driftguard.config.v1"));
}

#[test]
fn xtask_explain_coverage_passes() {
    assert!(xtask("explain-coverage").status.success());
}

#[test]
fn xtask_conform_passes_on_fixtures() {
    let output = xtask("conform");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn xtask_rejects_unknown_command() {
    assert!(!xtask("frobnicate").status.success());
}
