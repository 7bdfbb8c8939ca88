use crate::checks;
use crate::model::WorkflowSet;
use crate::policy::GovernancePolicy;
use driftguard_types::{ScanWarning, Violation};

/// Result of the violation scan over one workflow set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub violations: Vec<Violation>,
    /// Files skipped by the scan. Never violations on their own.
    pub warnings: Vec<ScanWarning>,
}

impl ScanOutcome {
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Run every check over `workflows`.
///
/// Output order is the input order (files, then required names); nothing is re-sorted.
pub fn evaluate(workflows: &WorkflowSet, policy: &GovernancePolicy) -> ScanOutcome {
    let mut out = ScanOutcome::default();

    checks::run_all(workflows, policy, &mut out);

    tracing::debug!(
        files = workflows.len(),
        violations = out.violations.len(),
        warnings = out.warnings.len(),
        "violation scan finished"
    );

    out
}
