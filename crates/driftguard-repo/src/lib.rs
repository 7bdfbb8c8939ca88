//! Repository adapters: discover and read workflow files from a checkout.
//!
//! This crate is allowed to do filesystem IO. It never fails on an individual
//! unreadable workflow; those are handed to the engine as unreadable content.

#![forbid(unsafe_code)]

mod discover;

use anyhow::Context;
use camino::Utf8Path;
use driftguard_domain::model::{WorkflowFile, WorkflowSet};
use driftguard_types::RepoPath;
use rayon::prelude::*;

pub use discover::{WORKFLOW_GLOB, discover_workflows};

/// Build the ordered workflow snapshot used by the commitment and the scan.
///
/// `repo_root` is the checkout root; `workflows_dir` is relative to it.
pub fn load_workflow_set(repo_root: &Utf8Path, workflows_dir: &str) -> anyhow::Result<WorkflowSet> {
    let paths = discover_workflows(repo_root, workflows_dir)
        .with_context(|| format!("discover workflows in {workflows_dir}"))?;

    // Indexed parallel collect keeps discovery order.
    let files: Vec<WorkflowFile> = paths
        .par_iter()
        .map(|path| read_workflow(repo_root, path))
        .collect();

    Ok(WorkflowSet::new(files))
}

fn read_workflow(repo_root: &Utf8Path, path: &RepoPath) -> WorkflowFile {
    let abs = repo_root.join(path.as_str());
    match std::fs::read(&abs) {
        Ok(bytes) => WorkflowFile::new(path.as_str(), bytes),
        Err(err) => {
            tracing::debug!(file = %path, error = %err, "workflow unreadable");
            WorkflowFile::unreadable(path.as_str(), err.to_string())
        }
    }
}
