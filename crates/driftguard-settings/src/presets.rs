use driftguard_domain::policy::GovernancePolicy;

pub const DEFAULT_PROFILE: &str = "thin-caller";

const GOVERNANCE_ALLOWLIST: &[&str] = &[
    "ci.yml",
    "policy.yml",
    "reusable-policy.yml",
    "autopilot-audit.yml",
    "daily-repo-report.yml",
    "secret-detection.yml",
];

const GOVERNANCE_REQUIRED: &[&str] = &["policy.yml", "reusable-policy.yml"];

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything repo-specific belongs in `driftguard.toml`.
pub fn preset(profile: &str) -> Option<GovernancePolicy> {
    match profile {
        "thin-caller" => Some(thin_caller_profile()),
        "strict" => Some(strict_profile()),
        _ => None,
    }
}

pub fn profile_names() -> &'static [&'static str] {
    &["thin-caller", "strict"]
}

/// Control-plane workflows may carry inline commands; everything else must be a thin caller.
fn thin_caller_profile() -> GovernancePolicy {
    GovernancePolicy::new(
        GOVERNANCE_ALLOWLIST.iter().copied(),
        GOVERNANCE_REQUIRED.iter().copied(),
    )
}

fn strict_profile() -> GovernancePolicy {
    GovernancePolicy::new(Vec::<String>::new(), GOVERNANCE_REQUIRED.iter().copied())
}
