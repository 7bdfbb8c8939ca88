//! The `check` use case: snapshot workflows, commit to them, scan for violations.

use anyhow::Context;
use camino::Utf8Path;
use driftguard_domain::report::scan;
use driftguard_settings::{DriftguardConfigV1, Overrides, ResolvedConfig};
use driftguard_types::ComplianceReport;
use time::OffsetDateTime;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Repository root path.
    pub repo_root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Repository identifier from the command line or CI environment.
    pub repository: Option<String>,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    /// The generated report.
    pub report: ComplianceReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Parse config text (empty means defaults) and resolve it against the overrides.
pub fn resolve_settings(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let cfg = if config_text.trim().is_empty() {
        DriftguardConfigV1::default()
    } else {
        driftguard_settings::parse_config_toml(config_text).context("parse config")?
    };

    driftguard_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Run the check use case: resolve config, load workflows, scan, produce report.
///
/// Both passes of the scan read the same in-memory snapshot, so the commitment
/// and the violations always describe the same bytes.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let captured_at = OffsetDateTime::now_utc();

    let resolved = resolve_settings(input.config_text, input.overrides)?;

    let workflows = driftguard_repo::load_workflow_set(input.repo_root, &resolved.workflows_dir)
        .context("load workflows")?;

    let repository = repository_id(
        input.repository.as_deref(),
        resolved.repository.as_deref(),
        input.repo_root,
    );

    let report = scan(&repository, &workflows, &resolved.policy, captured_at);

    tracing::info!(
        repository = %report.repository,
        files = report.file_count,
        violations = report.violation_count,
        root = %report.commitment_root,
        "scan complete"
    );

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Explicit identifier, then the configured one, then the checkout directory name.
fn repository_id(explicit: Option<&str>, configured: Option<&str>, repo_root: &Utf8Path) -> String {
    if let Some(id) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return id.to_string();
    }
    if let Some(id) = configured {
        return id.to_string();
    }

    let canonical = repo_root.canonicalize_utf8().ok();
    canonical
        .as_deref()
        .unwrap_or(repo_root)
        .file_name()
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftguard_types::{ComplianceStatus, ViolationKind};

    fn write_workflow(root: &Utf8Path, name: &str, text: &str) {
        let dir = root.join(".github/workflows");
        std::fs::create_dir_all(&dir).expect("create workflows dir");
        std::fs::write(dir.join(name), text).expect("write workflow");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        let output = run_check(CheckInput {
            repo_root: root,
            config_text: "",
            overrides: Overrides::default(),
            repository: Some("org/repo".to_string()),
        })
        .expect("run_check");

        assert_eq!(output.resolved_config.profile, "thin-caller");
        // No workflows at all: both default required files are missing.
        assert_eq!(output.report.file_count, 0);
        assert_eq!(output.report.violation_count, 2);
        assert_eq!(output.report.status, ComplianceStatus::DriftDetected);
    }

    #[test]
    fn config_controls_workflows_dir_and_required_files() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        std::fs::create_dir_all(root.join("ci")).expect("mkdir");
        std::fs::write(root.join("ci/build.yml"), "steps:\n  - run: make\n").expect("write");

        let output = run_check(CheckInput {
            repo_root: root,
            config_text: "workflows_dir = \"ci\"\nrequired_files = []\nrepository = \"org/cfg\"\n",
            overrides: Overrides::default(),
            repository: None,
        })
        .expect("run_check");

        let report = output.report;
        assert_eq!(report.repository, "org/cfg");
        assert_eq!(report.files[0].path.as_str(), "ci/build.yml");
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].kind, ViolationKind::BespokeRunCommand);
        assert_eq!(report.violations[0].lines, vec![2]);
    }

    #[test]
    fn overrides_extend_allowlist() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        write_workflow(root, "policy.yml", "name: p\n");
        write_workflow(root, "reusable-policy.yml", "name: rp\n");
        write_workflow(root, "nightly.yml", "steps:\n  - run: make\n");

        let output = run_check(CheckInput {
            repo_root: root,
            config_text: "",
            overrides: Overrides {
                allow: vec!["nightly.yml".to_string()],
                ..Default::default()
            },
            repository: None,
        })
        .expect("run_check");

        assert!(output.report.compliant);
        assert_eq!(output.report.file_count, 3);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        let err = run_check(CheckInput {
            repo_root: root,
            config_text: "profile = \"nope\"",
            overrides: Overrides::default(),
            repository: None,
        })
        .expect_err("unknown profile");
        assert!(format!("{err:#}").contains("unknown profile"));
    }

    #[test]
    fn repository_id_precedence() {
        let root = Utf8Path::new("/checkouts/service-a");
        assert_eq!(repository_id(Some("org/x"), Some("org/y"), root), "org/x");
        assert_eq!(repository_id(Some("  "), Some("org/y"), root), "org/y");
        assert_eq!(repository_id(None, None, root), "service-a");
    }
}
