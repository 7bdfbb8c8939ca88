use anyhow::Context;
use driftguard_types::{ComplianceReport, SCHEMA_REPORT_V1};

/// Parse a previously written report. Only `driftguard.report.v1` is accepted.
pub fn parse_report_json(text: &str) -> anyhow::Result<ComplianceReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse driftguard report")
}

pub fn serialize_report(report: &ComplianceReport) -> anyhow::Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(report).context("serialize report")?;
    data.push(b'\n');
    Ok(data)
}

/// Map compliance to exit code: 0 = compliant, 2 = drift detected.
pub fn report_exit_code(report: &ComplianceReport) -> i32 {
    if report.compliant { 0 } else { 2 }
}

/// Terminal summary of a report.
pub fn format_summary(report: &ComplianceReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Repository: {}\n", report.repository));
    out.push_str(&format!("Status: {}\n", status_label(report)));
    out.push_str(&format!("Commitment root: {}\n", report.commitment_root));
    out.push_str(&format!("Workflow files: {}\n", report.file_count));
    out.push_str(&format!("Violations: {}\n", report.violation_count));

    for v in &report.violations {
        let file = v.file.as_ref().map(|f| f.as_str()).unwrap_or("-");
        out.push_str(&format!("\n  {file}\n     {} ({})\n", v.message, v.kind.code()));
        if !v.lines.is_empty() {
            let lines: Vec<String> = v.lines.iter().map(u32::to_string).collect();
            out.push_str(&format!("     Lines: {}\n", lines.join(", ")));
        }
    }
    for w in &report.warnings {
        out.push_str(&format!("\n  warning: {} ({})\n", w.message, w.code));
    }

    out
}

fn status_label(report: &ComplianceReport) -> &'static str {
    if report.compliant {
        "compliant"
    } else {
        "drift_detected"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftguard_types::{
        ComplianceStatus, FileSummary, RepoPath, ToolMeta, Violation, ViolationKind, ids,
    };
    use time::macros::datetime;

    fn sample(compliant: bool) -> ComplianceReport {
        let violations = if compliant {
            Vec::new()
        } else {
            vec![Violation {
                kind: ViolationKind::BespokeRunCommand,
                check_id: ids::CHECK_WORKFLOWS_THIN_CALLER.to_string(),
                file: Some(RepoPath::new(".github/workflows/x.yml")),
                lines: vec![2, 5],
                message: "Contains 2 bespoke 'run:' command(s)".to_string(),
                help: None,
                fingerprint: None,
            }]
        };
        ComplianceReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta::current(),
            repository: "org/repo".to_string(),
            timestamp: datetime!(2026-03-01 12:00:00 UTC),
            commitment_root: "ab".repeat(32),
            file_count: 1,
            violation_count: violations.len() as u32,
            compliant,
            status: if compliant {
                ComplianceStatus::Compliant
            } else {
                ComplianceStatus::DriftDetected
            },
            files: vec![FileSummary {
                path: RepoPath::new(".github/workflows/x.yml"),
                hash: "cd".repeat(32),
            }],
            violations,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn serialize_then_parse_preserves_report() {
        let report = sample(false);
        let bytes = serialize_report(&report).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.ends_with("}\n"));
        assert_eq!(parse_report_json(&text).expect("parse"), report);
    }

    #[test]
    fn parse_rejects_foreign_schema() {
        let err = parse_report_json(r#"{"schema":"other.report.v1"}"#).expect_err("schema");
        assert!(err.to_string().contains("unknown report schema"));
        assert!(parse_report_json("not json").is_err());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(report_exit_code(&sample(true)), 0);
        assert_eq!(report_exit_code(&sample(false)), 2);
    }

    #[test]
    fn summary_lists_violation_lines() {
        let text = format_summary(&sample(false));
        assert!(text.contains("Status: drift_detected"));
        assert!(text.contains("Lines: 2, 5"));
        assert!(format_summary(&sample(true)).contains("Violations: 0"));
    }
}
