//! Shared test utilities for the driftguard workspace.
//!
//! Lives in its own crate so integration tests in several crates can share it.

use serde_json::Value;
use std::path::Path;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// Only applies when the *root* object looks like a compliance report (has
/// `schema`, `tool`, `timestamp`, `commitment_root` and `violations`). Then:
///
/// - `timestamp` becomes [`TIMESTAMP_PLACEHOLDER`]
/// - `tool.version` becomes [`VERSION_PLACEHOLDER`]
///
/// Nested objects are never touched, so workflow-derived data that happens to
/// contain a `timestamp` key survives.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    let is_report = value.as_object().is_some_and(|obj| {
        ["schema", "tool", "timestamp", "commitment_root", "violations"]
            .iter()
            .all(|k| obj.contains_key(*k))
    });
    if !is_report {
        return value;
    }

    if let Some(obj) = value.as_object_mut() {
        obj.insert(
            "timestamp".to_string(),
            Value::String(TIMESTAMP_PLACEHOLDER.to_string()),
        );
        if let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String(VERSION_PLACEHOLDER.to_string()),
            );
        }
    }

    value
}

/// Write `files` (name, contents) into `root/.github/workflows`, creating directories.
pub fn write_workflows(root: &Path, files: &[(&str, &str)]) -> std::io::Result<()> {
    let dir = root.join(".github").join("workflows");
    std::fs::create_dir_all(&dir)?;
    for (name, contents) in files {
        std::fs::write(dir.join(name), contents)?;
    }
    Ok(())
}
