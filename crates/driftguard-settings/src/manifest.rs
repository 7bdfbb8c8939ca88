//! Structural validation of the control-plane governance manifest.
//!
//! Problems are collected, not returned on first failure, so one run lists everything to fix.

use anyhow::Context;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

const GOVERNANCE_LEVELS: &[&str] = &["full", "partial", "monitoring"];
const ROLLOUT_STRATEGIES: &[&str] = &["phased", "immediate", "manual"];
const MERKLE_ALGORITHMS: &[&str] = &["sha256", "sha512"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ManifestSummary {
    pub control_plane: String,
    pub governed_repositories: usize,
    /// `None` when the manifest has no rollout strategy.
    pub rollout_strategy: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ManifestValidation {
    pub errors: Vec<String>,
    /// Only present when `errors` is empty.
    pub summary: Option<ManifestSummary>,
}

impl ManifestValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse and validate a governance manifest.
///
/// Only malformed YAML (or a non-mapping document) is an `Err`; structural
/// problems are reported in [`ManifestValidation::errors`].
pub fn validate_manifest(input: &str) -> anyhow::Result<ManifestValidation> {
    let doc: Value = serde_yaml::from_str(input).context("parse governance manifest")?;
    let Some(root) = doc.as_mapping() else {
        anyhow::bail!("governance manifest must be a YAML mapping");
    };

    let mut errors = Vec::new();

    if get(root, "version").is_none() {
        errors.push("Missing required field: version".to_string());
    }

    match get(root, "control_plane") {
        None => errors.push("Missing required field: control_plane".to_string()),
        Some(cp) => {
            for field in ["repository", "description"] {
                if field_of(cp, field).is_none() {
                    errors.push(format!("control_plane missing required field: {field}"));
                }
            }
        }
    }

    match get(root, "governed_repositories") {
        None => errors.push("Missing required field: governed_repositories".to_string()),
        Some(Value::Sequence(repos)) => {
            for (i, repo) in repos.iter().enumerate() {
                check_repository(i, repo, &mut errors);
            }
        }
        Some(_) => errors.push("governed_repositories must be a list".to_string()),
    }

    if let Some(strategy) = get(root, "rollout").and_then(|r| field_of(r, "strategy"))
        && !one_of(strategy, ROLLOUT_STRATEGIES)
    {
        errors.push(format!("Invalid rollout strategy: {}", display(strategy)));
    }

    if let Some(algorithm) = get(root, "event_stream")
        .and_then(|es| field_of(es, "merkle_tree"))
        .and_then(|mt| field_of(mt, "algorithm"))
        && !one_of(algorithm, MERKLE_ALGORITHMS)
    {
        errors.push(format!("Invalid merkle_tree algorithm: {}", display(algorithm)));
    }

    let summary = errors.is_empty().then(|| summarize(root));
    Ok(ManifestValidation { errors, summary })
}

fn check_repository(i: usize, repo: &Value, errors: &mut Vec<String>) {
    for field in ["name", "description"] {
        if field_of(repo, field).is_none() {
            errors.push(format!("Repository {i} missing required field: {field}"));
        }
    }

    match field_of(repo, "governance_level") {
        None => errors.push(format!(
            "Repository {i} missing required field: governance_level"
        )),
        Some(level) if !one_of(level, GOVERNANCE_LEVELS) => errors.push(format!(
            "Repository {i} has invalid governance_level: {}",
            display(level)
        )),
        Some(_) => {}
    }

    match field_of(repo, "policies") {
        None => errors.push(format!("Repository {i} missing required field: policies")),
        Some(Value::Sequence(_)) => {}
        Some(_) => errors.push(format!("Repository {i} policies must be a list")),
    }
}

fn summarize(root: &Mapping) -> ManifestSummary {
    let control_plane = get(root, "control_plane")
        .and_then(|cp| field_of(cp, "repository"))
        .map(display)
        .unwrap_or_default();
    let governed_repositories = match get(root, "governed_repositories") {
        Some(Value::Sequence(repos)) => repos.len(),
        _ => 0,
    };
    let rollout_strategy = get(root, "rollout")
        .and_then(|r| field_of(r, "strategy"))
        .map(display);

    ManifestSummary {
        control_plane,
        governed_repositories,
        rollout_strategy,
    }
}

fn get<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.get(key)
}

/// A key lookup on a value that may not be a mapping at all.
fn field_of<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_mapping().and_then(|m| m.get(key))
}

fn one_of(value: &Value, allowed: &[&str]) -> bool {
    value.as_str().is_some_and(|s| allowed.contains(&s))
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}
