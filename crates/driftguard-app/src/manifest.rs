//! The `validate-manifest` use case.

use anyhow::Context;
use driftguard_settings::ManifestValidation;

pub fn run_validate_manifest(text: &str) -> anyhow::Result<ManifestValidation> {
    driftguard_settings::validate_manifest(text).context("validate governance manifest")
}

/// Human-readable result: every error, or a short summary when valid.
pub fn format_manifest_validation(source: &str, result: &ManifestValidation) -> String {
    let mut out = format!("Validating manifest: {source}\n\n");

    if !result.is_valid() {
        out.push_str(&format!(
            "Validation failed with {} error(s):\n",
            result.errors.len()
        ));
        for error in &result.errors {
            out.push_str(&format!("  - {error}\n"));
        }
        return out;
    }

    out.push_str("Manifest is valid\n");
    if let Some(summary) = &result.summary {
        out.push_str("\nSummary:\n");
        out.push_str(&format!("  Control plane: {}\n", summary.control_plane));
        out.push_str(&format!(
            "  Governed repositories: {}\n",
            summary.governed_repositories
        ));
        out.push_str(&format!(
            "  Rollout strategy: {}\n",
            summary.rollout_strategy.as_deref().unwrap_or("not configured")
        ));
    }
    out
}
