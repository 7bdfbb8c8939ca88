//! Use case orchestration for driftguard.
//!
//! This crate provides the application layer: use cases that coordinate the settings, repo,
//! and domain layers. It is intentionally thin and delegates heavy lifting to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod commitment;
mod explain;
mod manifest;
mod report;

pub use check::{CheckInput, CheckOutput, resolve_settings, run_check};
pub use commitment::{CommitmentInput, CommitmentOutput, format_commitment, run_commitment};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use manifest::{format_manifest_validation, run_validate_manifest};
pub use report::{format_summary, parse_report_json, report_exit_code, serialize_report};
