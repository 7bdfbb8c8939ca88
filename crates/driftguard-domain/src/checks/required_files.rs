use crate::engine::ScanOutcome;
use crate::fingerprint::fingerprint_for_violation;
use crate::model::WorkflowSet;
use crate::policy::GovernancePolicy;
use driftguard_types::{RepoPath, Violation, ViolationKind};

pub fn run(workflows: &WorkflowSet, policy: &GovernancePolicy, out: &mut ScanOutcome) {
    let kind = ViolationKind::MissingRequiredFile;

    for name in &policy.required_files {
        // Presence only; an unreadable file still counts as present.
        if workflows.contains_file_name(name) {
            continue;
        }

        out.violations.push(Violation {
            kind,
            check_id: kind.check_id().to_string(),
            file: Some(RepoPath::new(name)),
            lines: Vec::new(),
            message: format!("Required governance file '{name}' is missing"),
            help: Some(
                "Restore the workflow from the control-plane template, or drop it from required_files."
                    .to_string(),
            ),
            fingerprint: Some(fingerprint_for_violation(kind.check_id(), kind.code(), name)),
        });
    }
}
