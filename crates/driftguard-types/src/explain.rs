//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after workflow examples.
    pub examples: ExamplePair,
}

/// Before and after workflow examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// YAML that would trigger a violation.
    pub before: &'static str,
    /// YAML that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_WORKFLOWS_THIN_CALLER => Some(explain_thin_caller()),
        ids::CHECK_WORKFLOWS_REQUIRED_FILES => Some(explain_required_files()),

        // Codes
        ids::CODE_BESPOKE_RUN_COMMAND => Some(explain_bespoke_run_command()),
        ids::CODE_MISSING_REQUIRED_FILE => Some(explain_missing_required_file()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_WORKFLOWS_THIN_CALLER,
        ids::CHECK_WORKFLOWS_REQUIRED_FILES,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[ids::CODE_BESPOKE_RUN_COMMAND, ids::CODE_MISSING_REQUIRED_FILE]
}

// --- Check-level explanations ---

fn explain_thin_caller() -> Explanation {
    Explanation {
        title: "Thin-Caller Workflows",
        description: "\
Detects workflow files that embed inline `run:` commands.

Governed repositories are expected to keep their workflows as thin callers of
centrally maintained reusable workflows. Inline shell steps drift silently:
- they bypass review of the shared pipeline definition
- they are invisible to the control plane that audits CI behavior
- they make the same job behave differently across repositories

Files named in the policy allowlist are exempt.",
        remediation: "\
Move the commands into an approved reusable workflow and call it with `uses:`.
If the workflow legitimately needs inline steps, add its file name to the
allowlist in driftguard.toml (`extra_allowlist = [\"name.yml\"]`).",
        examples: ExamplePair {
            before: r#"jobs:
  test:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - run: npm test"#,
            after: r#"jobs:
  test:
    uses: org/control-plane/.github/workflows/reusable-node-test.yml@main"#,
        },
    }
}

fn explain_required_files() -> Explanation {
    Explanation {
        title: "Required Governance Workflows",
        description: "\
Detects governance workflow files that the policy requires but the repository
does not contain.

Required workflows (for example `policy.yml`) are how the control plane enforces
checks on every governed repository. A missing file means the repository is no
longer reporting into governance.",
        remediation: "\
Restore the missing workflow from the control-plane template, or remove it from
`required_files` if the repository is no longer governed by that policy.",
        examples: ExamplePair {
            before: r#"# .github/workflows/
ci.yml"#,
            after: r#"# .github/workflows/
ci.yml
policy.yml
reusable-policy.yml"#,
        },
    }
}

// --- Code-level explanations ---

fn explain_bespoke_run_command() -> Explanation {
    let mut exp = explain_thin_caller();
    exp.title = "Bespoke run: Command";
    exp
}

fn explain_missing_required_file() -> Explanation {
    let mut exp = explain_required_files();
    exp.title = "Missing Required File";
    exp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_check_id() {
        assert!(lookup_explanation(ids::CHECK_WORKFLOWS_THIN_CALLER).is_some());
        assert!(lookup_explanation(ids::CHECK_WORKFLOWS_REQUIRED_FILES).is_some());
    }

    #[test]
    fn lookup_by_code() {
        assert!(lookup_explanation(ids::CODE_BESPOKE_RUN_COMMAND).is_some());
        assert!(lookup_explanation(ids::CODE_MISSING_REQUIRED_FILE).is_some());
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup_explanation("unknown.check").is_none());
        assert!(lookup_explanation("unknown_code").is_none());
    }

    #[test]
    fn all_registered_ids_resolve() {
        for id in all_check_ids().iter().chain(all_codes()) {
            assert!(
                lookup_explanation(id).is_some(),
                "{} should be in registry",
                id
            );
        }
    }
}
