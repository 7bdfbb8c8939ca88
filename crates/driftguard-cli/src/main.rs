//! CLI entry point for driftguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `driftguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use driftguard_app::{
    CheckInput, CommitmentInput, ExplainOutput, format_commitment, format_explanation,
    format_manifest_validation, format_not_found, format_summary, parse_report_json,
    report_exit_code, run_check, run_commitment, run_explain, run_validate_manifest,
    serialize_report,
};
use driftguard_settings::Overrides;
use driftguard_types::ComplianceReport;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "driftguard",
    version,
    about = "CI workflow drift sensor with Merkle state commitments"
)]
struct Cli {
    /// Repository root (defaults to $GITHUB_WORKSPACE, then the current directory).
    #[arg(long, global = true)]
    repo_root: Option<Utf8PathBuf>,

    /// Path to driftguard config TOML, relative to the repository root.
    #[arg(long, global = true, default_value = "driftguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (thin-caller|strict).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Commit to the workflow set, scan it for violations, and write the report.
    Check {
        /// Repository identifier for the report (defaults to $GITHUB_REPOSITORY).
        #[arg(long)]
        repository: Option<String>,

        /// Additional allowlisted workflow file name (repeatable).
        #[arg(long = "allow", value_name = "NAME")]
        allow: Vec<String>,

        /// Additional required workflow file name (repeatable).
        #[arg(long = "require", value_name = "NAME")]
        require: Vec<String>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/driftguard/report.json")]
        report_out: Utf8PathBuf,
    },

    /// Print the Merkle root of the current workflow set.
    Root {
        /// Also print each leaf hash with its file path.
        #[arg(long)]
        leaves: bool,
    },

    /// Print a human-readable summary of an existing JSON report.
    Summary {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/driftguard/report.json")]
        report: Utf8PathBuf,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "workflows.thin_caller") or code (e.g., "bespoke_run_command").
        identifier: String,
    },

    /// Validate a control-plane governance manifest (YAML).
    ValidateManifest {
        /// Path to the manifest file.
        path: Utf8PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.cmd {
        Commands::Check {
            repository,
            allow,
            require,
            report_out,
        } => cmd_check(&cli, repository.clone(), allow.clone(), require.clone(), report_out),
        Commands::Root { leaves } => cmd_root(&cli, *leaves),
        Commands::Summary { report } => cmd_summary(report),
        Commands::Explain { identifier } => cmd_explain(identifier),
        Commands::ValidateManifest { path } => cmd_validate_manifest(path),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("driftguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn repo_root(cli: &Cli) -> anyhow::Result<Utf8PathBuf> {
    let root = cli
        .repo_root
        .clone()
        .or_else(|| env_non_empty("GITHUB_WORKSPACE").map(Utf8PathBuf::from))
        .unwrap_or_else(|| Utf8PathBuf::from("."));

    if !root.is_dir() {
        anyhow::bail!("repo root does not exist: {root}");
    }
    Ok(root.canonicalize_utf8().unwrap_or(root))
}

/// Missing config file is allowed (defaults apply); any other read error is not.
fn read_config(repo_root: &Utf8Path, config: &Utf8Path) -> anyhow::Result<String> {
    let path = repo_root.join(config);
    match std::fs::read_to_string(&path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path, "no config file; using defaults");
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config: {path}")),
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn cmd_check(
    cli: &Cli,
    repository: Option<String>,
    allow: Vec<String>,
    require: Vec<String>,
    report_out: &Utf8Path,
) -> anyhow::Result<i32> {
    let repo_root = repo_root(cli)?;
    let cfg_text = read_config(&repo_root, &cli.config)?;

    let input = CheckInput {
        repo_root: &repo_root,
        config_text: &cfg_text,
        overrides: Overrides {
            profile: cli.profile.clone(),
            allow,
            require,
        },
        repository: repository.or_else(|| env_non_empty("GITHUB_REPOSITORY")),
    };

    let output = run_check(input)?;

    write_report_file(report_out, &output.report).context("write report json")?;
    tracing::info!(path = %report_out, "report written");

    print!("{}", format_summary(&output.report));
    Ok(report_exit_code(&output.report))
}

fn cmd_root(cli: &Cli, leaves: bool) -> anyhow::Result<i32> {
    let repo_root = repo_root(cli)?;
    let cfg_text = read_config(&repo_root, &cli.config)?;

    let output = run_commitment(CommitmentInput {
        repo_root: &repo_root,
        config_text: &cfg_text,
        overrides: Overrides {
            profile: cli.profile.clone(),
            ..Default::default()
        },
    })?;

    print!("{}", format_commitment(&output, leaves));
    Ok(0)
}

fn cmd_summary(report_path: &Utf8Path) -> anyhow::Result<i32> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    let report = parse_report_json(&report_text)?;

    print!("{}", format_summary(&report));
    Ok(report_exit_code(&report))
}

fn cmd_explain(identifier: &str) -> anyhow::Result<i32> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(0)
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_check_ids, available_codes)
            );
            Ok(1)
        }
    }
}

fn cmd_validate_manifest(path: &Utf8Path) -> anyhow::Result<i32> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read manifest: {path}"))?;
    let result = run_validate_manifest(&text)?;

    print!("{}", format_manifest_validation(path.as_str(), &result));
    Ok(if result.is_valid() { 0 } else { 1 })
}

fn write_report_file(path: &Utf8Path, report: &ComplianceReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}
