use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Schema identifier accepted in the optional `schema` field.
pub const SCHEMA_CONFIG_V1: &str = "driftguard.config.v1";

/// `driftguard.toml` schema v1.
///
/// Every field is optional; an empty file means "the default profile".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DriftguardConfigV1 {
    /// Optional schema string for tooling (`driftguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Preset to start from: `thin-caller` (default) or `strict`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Repository identifier written into reports (e.g. `org/name`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Workflow directory relative to the repo root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflows_dir: Option<String>,

    /// Replaces the preset allowlist when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowlist: Option<Vec<String>>,

    /// Replaces the preset required files when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_files: Option<Vec<String>>,

    /// Appended to the allowlist after presets and `allowlist`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_allowlist: Vec<String>,
}
