//! Config parsing, profile/preset resolution, and governance manifest validation.
//!
//! This crate is IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod manifest;
mod model;
mod presets;
mod resolve;

pub use manifest::{ManifestSummary, ManifestValidation, validate_manifest};
pub use model::{DriftguardConfigV1, SCHEMA_CONFIG_V1};
pub use presets::{DEFAULT_PROFILE, profile_names};
pub use resolve::{DEFAULT_WORKFLOWS_DIR, Overrides, ResolvedConfig};

/// Parse `driftguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<DriftguardConfigV1> {
    let cfg: DriftguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective policy used by the engine (preset + config + overrides).
pub fn resolve_config(
    cfg: DriftguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
