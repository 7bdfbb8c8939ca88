use crate::{model::DriftguardConfigV1, presets};
use anyhow::Context;
use driftguard_domain::policy::GovernancePolicy;

pub const DEFAULT_WORKFLOWS_DIR: &str = ".github/workflows";

/// Command-line overrides. `allow` and `require` extend the resolved lists.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub allow: Vec<String>,
    pub require: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub profile: String,
    pub repository: Option<String>,
    /// Repo-relative, forward slashes, no trailing slash.
    pub workflows_dir: String,
    pub policy: GovernancePolicy,
}

pub fn resolve_config(
    cfg: DriftguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| presets::DEFAULT_PROFILE.to_string());

    let Some(mut policy) = presets::preset(&profile) else {
        anyhow::bail!(
            "unknown profile: {profile} (expected one of: {})",
            presets::profile_names().join(", ")
        );
    };

    if let Some(allowlist) = cfg.allowlist {
        policy.allowlist = allowlist;
    }
    if let Some(required) = cfg.required_files {
        policy.required_files = required;
    }
    policy.allowlist.extend(cfg.extra_allowlist);
    policy.allowlist.extend(overrides.allow);
    policy.required_files.extend(overrides.require);

    policy.allowlist = normalize_names(policy.allowlist).context("invalid allowlist")?;
    policy.required_files =
        normalize_names(policy.required_files).context("invalid required_files")?;

    let workflows_dir = match cfg.workflows_dir.as_deref() {
        Some(dir) => normalize_workflows_dir(dir)?,
        None => DEFAULT_WORKFLOWS_DIR.to_string(),
    };

    let repository = cfg
        .repository
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    Ok(ResolvedConfig {
        profile,
        repository,
        workflows_dir,
        policy,
    })
}

/// Trim entries, reject anything that is not a plain file name, drop repeats (first wins).
fn normalize_names(names: Vec<String>) -> anyhow::Result<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("file names must not be empty");
        }
        if name.contains(['/', '\\']) {
            anyhow::bail!("{name:?} is not a plain file name (no directory separators)");
        }
        if name == "." || name == ".." {
            anyhow::bail!("{name:?} is not a file name");
        }
        if !out.iter().any(|existing| existing == name) {
            out.push(name.to_string());
        }
    }
    Ok(out)
}

fn normalize_workflows_dir(dir: &str) -> anyhow::Result<String> {
    let dir = dir.trim().replace('\\', "/");
    let dir = dir.trim_start_matches("./").trim_end_matches('/');
    if dir.is_empty() {
        anyhow::bail!("workflows_dir must not be empty");
    }
    if dir.starts_with('/') || dir.split('/').any(|seg| seg == "..") {
        anyhow::bail!("workflows_dir must stay inside the repository: {dir}");
    }
    Ok(dir.to_string())
}
