//! End-to-end tests for `driftguard check`, `root`, `summary` and `validate-manifest`.

use assert_cmd::Command;
use driftguard_test_util::{normalize_nondeterministic, write_workflows};
use predicates::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(deprecated)]
fn driftguard_cmd() -> Command {
    let mut cmd = Command::cargo_bin("driftguard").unwrap();
    cmd.env_remove("GITHUB_REPOSITORY")
        .env_remove("GITHUB_WORKSPACE")
        .env_remove("RUST_LOG");
    cmd
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("driftguard-cli should have parent")
        .parent()
        .expect("crates should have parent")
        .join("tests")
        .join("fixtures")
}

fn read_json(path: &Path) -> Value {
    let text = std::fs::read_to_string(path).expect("read report");
    serde_json::from_str(&text).expect("parse report")
}

fn check(repo_root: &Path, report: &Path) -> assert_cmd::assert::Assert {
    driftguard_cmd()
        .arg("--repo-root")
        .arg(repo_root)
        .arg("check")
        .arg("--repository")
        .arg("org/fixture")
        .arg("--report-out")
        .arg(report)
        .assert()
}

#[test]
fn compliant_fixture_exits_zero() {
    let out = TempDir::new().expect("temp dir");
    let report_path = out.path().join("nested/report.json");

    check(&fixtures_dir().join("workflows_compliant"), &report_path)
        .success()
        .stdout(predicate::str::contains("Status: compliant"));

    let report = read_json(&report_path);
    assert_eq!(report["schema"], "driftguard.report.v1");
    assert_eq!(report["repository"], "org/fixture");
    assert_eq!(report["compliant"], true);
    assert_eq!(report["status"], "compliant");
    assert_eq!(report["file_count"], 4);
    assert_eq!(report["violations"], Value::Array(vec![]));
}

#[test]
fn drift_fixture_exits_two() {
    let out = TempDir::new().expect("temp dir");
    let report_path = out.path().join("report.json");

    check(&fixtures_dir().join("workflows_drift"), &report_path)
        .code(2)
        .stdout(predicate::str::contains("Status: drift_detected"));

    let report = read_json(&report_path);
    assert_eq!(report["compliant"], false);
    assert_eq!(report["violation_count"], 2);

    let violations = report["violations"].as_array().expect("violations");
    assert_eq!(violations[0]["kind"], "bespoke_run_command");
    assert_eq!(violations[0]["file"], ".github/workflows/deploy.yml");
    assert_eq!(violations[0]["lines"], serde_json::json!([11, 14]));
    assert_eq!(violations[1]["kind"], "missing_required_file");
    assert_eq!(violations[1]["file"], "policy.yml");
    assert!(violations[1].get("lines").is_none());
}

#[test]
fn repeated_checks_are_identical_after_normalization() {
    let out = TempDir::new().expect("temp dir");
    let a = out.path().join("a.json");
    let b = out.path().join("b.json");
    let fixture = fixtures_dir().join("workflows_drift");

    check(&fixture, &a).code(2);
    check(&fixture, &b).code(2);

    assert_eq!(
        normalize_nondeterministic(read_json(&a)),
        normalize_nondeterministic(read_json(&b))
    );
}

#[test]
fn cli_overrides_and_env_repository() {
    let repo = TempDir::new().expect("temp dir");
    write_workflows(
        repo.path(),
        &[
            ("nightly.yml", "jobs:\n  n:\n    steps:\n      - run: make nightly\n"),
            ("policy.yml", "name: Policy\n"),
        ],
    )
    .expect("write workflows");
    let report_path = repo.path().join("out.json");

    driftguard_cmd()
        .env("GITHUB_REPOSITORY", "org/from-env")
        .arg("--repo-root")
        .arg(repo.path())
        .args(["check", "--allow", "nightly.yml", "--report-out"])
        .arg(&report_path)
        .assert()
        .code(2);

    let report = read_json(&report_path);
    assert_eq!(report["repository"], "org/from-env");
    let violations = report["violations"].as_array().expect("violations");
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["file"], "reusable-policy.yml");
}

#[test]
fn strict_profile_from_config_flags_ci_yml() {
    let repo = TempDir::new().expect("temp dir");
    write_workflows(
        repo.path(),
        &[
            ("ci.yml", "steps:\n  - run: cargo test\n"),
            ("policy.yml", "name: p\n"),
            ("reusable-policy.yml", "name: rp\n"),
        ],
    )
    .expect("write workflows");
    std::fs::write(repo.path().join("driftguard.toml"), "profile = \"strict\"\n")
        .expect("write config");
    let report_path = repo.path().join("out.json");

    check(repo.path(), &report_path).code(2);
    let report = read_json(&report_path);
    assert_eq!(report["violations"][0]["file"], ".github/workflows/ci.yml");
}

#[test]
fn invalid_config_is_a_tool_error() {
    let repo = TempDir::new().expect("temp dir");
    std::fs::write(repo.path().join("driftguard.toml"), "allowlist = [\"a/b.yml\"]\n")
        .expect("write config");

    check(repo.path(), &repo.path().join("out.json"))
        .code(1)
        .stderr(predicate::str::contains("driftguard error"));
    assert!(!repo.path().join("out.json").exists());
}

#[test]
fn missing_repo_root_is_a_tool_error() {
    let out = TempDir::new().expect("temp dir");
    check(&out.path().join("does-not-exist"), &out.path().join("r.json"))
        .code(1)
        .stderr(predicate::str::contains("repo root does not exist"));
}

#[test]
fn root_matches_report_commitment() {
    let out = TempDir::new().expect("temp dir");
    let report_path = out.path().join("report.json");
    let fixture = fixtures_dir().join("workflows_compliant");
    check(&fixture, &report_path).success();
    let report = read_json(&report_path);

    let output = driftguard_cmd()
        .arg("--repo-root")
        .arg(&fixture)
        .args(["root", "--leaves"])
        .output()
        .expect("run root");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let mut lines = stdout.lines();
    assert_eq!(Some(report["commitment_root"].as_str().expect("root")), lines.next());
    assert_eq!(lines.count(), 4);
}

#[test]
fn empty_repo_root_is_hash_of_empty_string() {
    let repo = TempDir::new().expect("temp dir");
    driftguard_cmd()
        .arg("--repo-root")
        .arg(repo.path())
        .arg("root")
        .assert()
        .success()
        .stdout("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855\n");
}

#[test]
fn summary_reads_written_report() {
    let out = TempDir::new().expect("temp dir");
    let report_path = out.path().join("report.json");
    check(&fixtures_dir().join("workflows_drift"), &report_path).code(2);

    driftguard_cmd()
        .arg("summary")
        .arg("--report")
        .arg(&report_path)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Lines: 11, 14"));
}

#[test]
fn validate_manifest_reports_errors() {
    let dir = TempDir::new().expect("temp dir");
    let good = dir.path().join("good.yml");
    let bad = dir.path().join("bad.yml");
    std::fs::write(
        &good,
        "version: 1\ncontrol_plane:\n  repository: org/cp\n  description: cp\ngoverned_repositories:\n  - name: org/a\n    description: a\n    governance_level: full\n    policies: [thin-caller]\nrollout:\n  strategy: phased\n",
    )
    .expect("write");
    std::fs::write(&bad, "version: 1\ngoverned_repositories: []\n").expect("write");

    driftguard_cmd()
        .arg("validate-manifest")
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains("Governed repositories: 1"))
        .stdout(predicate::str::contains("Rollout strategy: phased"));

    driftguard_cmd()
        .arg("validate-manifest")
        .arg(&bad)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Missing required field: control_plane",
        ));
}
