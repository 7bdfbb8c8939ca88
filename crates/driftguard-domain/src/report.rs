//! Report assembly: commitment + scan outcome -> [`ComplianceReport`].

use crate::commitment::CommitmentTree;
use crate::engine::{ScanOutcome, evaluate};
use crate::model::WorkflowSet;
use crate::policy::GovernancePolicy;
use driftguard_types::{
    ComplianceReport, ComplianceStatus, FileSummary, SCHEMA_REPORT_V1, ToolMeta,
};
use time::OffsetDateTime;

/// Merge a commitment and a scan outcome. `compliant` is exactly "no violations".
pub fn assemble(
    repository: &str,
    tree: &CommitmentTree,
    workflows: &WorkflowSet,
    outcome: ScanOutcome,
    captured_at: OffsetDateTime,
) -> ComplianceReport {
    let files: Vec<FileSummary> = workflows
        .files
        .iter()
        .map(|f| FileSummary {
            path: f.path.clone(),
            hash: f.content_hash(),
        })
        .collect();

    let compliant = outcome.is_compliant();
    let ScanOutcome {
        violations,
        warnings,
    } = outcome;

    ComplianceReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta::current(),
        repository: repository.to_string(),
        timestamp: captured_at,
        commitment_root: tree.root().to_string(),
        file_count: files.len() as u32,
        violation_count: violations.len() as u32,
        compliant,
        status: if compliant {
            ComplianceStatus::Compliant
        } else {
            ComplianceStatus::DriftDetected
        },
        files,
        violations,
        warnings,
    }
}

/// Full scan: commitment and violation passes over the same snapshot, then assembly.
pub fn scan(
    repository: &str,
    workflows: &WorkflowSet,
    policy: &GovernancePolicy,
    captured_at: OffsetDateTime,
) -> ComplianceReport {
    let tree = CommitmentTree::from_workflows(workflows);
    let outcome = evaluate(workflows, policy);
    assemble(repository, &tree, workflows, outcome, captured_at)
}
