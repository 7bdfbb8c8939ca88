//! Developer tasks (schema generation, conformance checks).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use driftguard_app::{CheckInput, run_check, serialize_report};
use driftguard_settings::Overrides;
use driftguard_test_util::normalize_nondeterministic;
use schemars::schema_for;
use std::fs;
use std::path::PathBuf;

/// Project root (parent of the xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("determine current directory")?,
    };

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(PathBuf::from)
            .context("xtask has no parent directory")
    } else {
        Ok(manifest_dir)
    }
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

fn fixtures_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("tests").join("fixtures"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(driftguard_types::ComplianceReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(driftguard_settings::DriftguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "driftguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "driftguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json).with_context(|| format!("write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut stale = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        let expected = serialize_schema(&(spec.generate)())?;
        match fs::read_to_string(&path) {
            Ok(actual) if actual == expected => {}
            Ok(_) => stale.push(format!("{} (out of date)", spec.filename)),
            Err(_) => stale.push(format!("{} (missing)", spec.filename)),
        }
    }

    if stale.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    for name in &stale {
        eprintln!("  - {name}");
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("schema validation failed")
}

/// Check that a path is clean: no absolute paths, no `../`, forward slashes only.
fn is_clean_path(path: &str) -> bool {
    !(path.starts_with('/')
        || path.contains("..")
        || path.contains('\\')
        || (path.len() >= 2 && path.as_bytes()[1] == b':'))
}

/// Scan every fixture repo under tests/fixtures and validate the produced reports.
///
/// Checks:
/// 1. the report validates against the generated report schema
/// 2. every file path in the report is repo-relative and clean
/// 3. a second scan is identical once timestamp and version are normalized
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema()).context("schema to json")?;
    let compiled = jsonschema::draft7::new(&schema)
        .map_err(|e| anyhow::anyhow!("compile report schema: {e}"))?;

    let mut errors = Vec::new();
    let mut checked = 0usize;

    let mut entries: Vec<PathBuf> = fs::read_dir(fixtures_dir()?)
        .context("read tests/fixtures")?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.join(".github").is_dir())
        .collect();
    entries.sort();

    for path in entries {
        let root = Utf8PathBuf::from_path_buf(path)
            .map_err(|p| anyhow::anyhow!("non-UTF-8 fixture path: {}", p.display()))?;
        let first = scan_fixture(&root)?;
        let second = scan_fixture(&root)?;

        for error in compiled.iter_errors(&first) {
            errors.push(format!("{root}: {error}"));
        }
        for pointer in ["/files", "/violations"] {
            let items = first.pointer(pointer).and_then(|v| v.as_array());
            for item in items.into_iter().flatten() {
                let p = item
                    .get("path")
                    .or_else(|| item.get("file"))
                    .and_then(|v| v.as_str())
                    .unwrap_or_default();
                if !is_clean_path(p) {
                    errors.push(format!("{root}: unclean path {p:?}"));
                }
            }
        }
        if normalize_nondeterministic(first) != normalize_nondeterministic(second) {
            errors.push(format!("{root}: repeated scans differ"));
        }
        checked += 1;
    }

    if errors.is_empty() {
        println!("✓ {checked} fixture reports conform");
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("conformance failed with {} errors", errors.len())
}

fn scan_fixture(root: &camino::Utf8Path) -> anyhow::Result<serde_json::Value> {
    let output = run_check(CheckInput {
        repo_root: root,
        config_text: "",
        overrides: Overrides::default(),
        repository: Some("fixture/repo".to_string()),
    })
    .with_context(|| format!("scan {root}"))?;
    let bytes = serialize_report(&output.report)?;
    serde_json::from_slice(&bytes).context("reparse report")
}

/// Validate that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    use driftguard_types::explain;

    let mut errors = Vec::new();
    for id in explain::all_check_ids().iter().chain(explain::all_codes()) {
        match explain::lookup_explanation(id) {
            Some(exp) => {
                for (field, text) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                ] {
                    if text.trim().is_empty() {
                        errors.push(format!("'{id}' has empty {field}"));
                    }
                }
            }
            None => errors.push(format!("'{id}' has no explanation")),
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", explain::all_check_ids().len());
        println!("✓ {} codes have explanations", explain::all_codes().len());
        return Ok(());
    }
    for error in &errors {
        eprintln!("  - {error}");
    }
    bail!("explain coverage failed with {} errors", errors.len())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Scan tests/fixtures repos and validate the reports");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
