use crate::engine::ScanOutcome;
use crate::model::WorkflowSet;
use crate::policy::GovernancePolicy;

pub mod inline_run;
mod required_files;


pub use inline_run::{LineClass, StepTracker, scan_lines};

/// Inline-command findings first, then missing files. Both keep input order.
pub fn run_all(workflows: &WorkflowSet, policy: &GovernancePolicy, out: &mut ScanOutcome) {
    inline_run::run(workflows, policy, out);
    required_files::run(workflows, policy, out);
}
