use crate::RepoPath;
use crate::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for driftguard compliance reports.
pub const SCHEMA_REPORT_V1: &str = "driftguard.report.v1";

/// The two governance violation classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A workflow embeds an inline `run:` command instead of calling an approved workflow.
    BespokeRunCommand,
    /// A governance workflow required by policy is absent.
    MissingRequiredFile,
}

impl ViolationKind {
    pub fn code(self) -> &'static str {
        match self {
            ViolationKind::BespokeRunCommand => ids::CODE_BESPOKE_RUN_COMMAND,
            ViolationKind::MissingRequiredFile => ids::CODE_MISSING_REQUIRED_FILE,
        }
    }

    pub fn check_id(self) -> &'static str {
        match self {
            ViolationKind::BespokeRunCommand => ids::CHECK_WORKFLOWS_THIN_CALLER,
            ViolationKind::MissingRequiredFile => ids::CHECK_WORKFLOWS_REQUIRED_FILES,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    pub kind: ViolationKind,
    pub check_id: String,

    /// Offending file. For missing files this is the required file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<RepoPath>,

    /// 1-based line numbers; only populated for line-scoped kinds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<u32>,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Stable identifier intended for dedup and trending across scans.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Non-fatal scan diagnostic. Never affects `compliant`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScanWarning {
    pub file: RepoPath,
    pub code: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileSummary {
    pub path: RepoPath,
    /// Hex-encoded SHA-256 of the file bytes (the commitment leaf).
    pub hash: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    DriftDetected,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

impl ToolMeta {
    pub fn current() -> Self {
        Self {
            name: "driftguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// The compliance report emitted for one scan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceReport {
    /// Versioned schema identifier for the report shape.
    pub schema: String,
    pub tool: ToolMeta,
    pub repository: String,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,

    /// Merkle root over the ordered file hashes.
    pub commitment_root: String,
    pub file_count: u32,
    pub violation_count: u32,
    pub compliant: bool,
    pub status: ComplianceStatus,

    pub files: Vec<FileSummary>,
    pub violations: Vec<Violation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScanWarning>,
}
