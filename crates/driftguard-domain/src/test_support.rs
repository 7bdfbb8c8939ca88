use crate::model::WorkflowFile;
use crate::policy::GovernancePolicy;

pub const WORKFLOWS_DIR: &str = ".github/workflows";

pub fn workflow(name: &str, text: &str) -> WorkflowFile {
    WorkflowFile::new(format!("{WORKFLOWS_DIR}/{name}"), text)
}

pub fn policy(allowlist: &[&str], required_files: &[&str]) -> GovernancePolicy {
    GovernancePolicy::new(allowlist.iter().copied(), required_files.iter().copied())
}

/// Two inline steps under a job, plus a `runs-on:` key that must not match.
pub const TWO_RUN_STEPS: &str = r#"
name: Violation
on: push
jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - run: echo "test"
      - run: npm test
"#;

pub const THIN_CALLER: &str = r#"
name: Compliant
on: push
jobs:
  test:
    uses: ./.github/workflows/reusable.yml
"#;
