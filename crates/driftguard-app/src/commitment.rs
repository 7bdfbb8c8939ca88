//! The `root` use case: compute the Merkle commitment without scanning.

use crate::check::resolve_settings;
use anyhow::Context;
use camino::Utf8Path;
use driftguard_domain::CommitmentTree;
use driftguard_settings::Overrides;
use driftguard_types::FileSummary;

#[derive(Clone, Debug)]
pub struct CommitmentInput<'a> {
    pub repo_root: &'a Utf8Path,
    pub config_text: &'a str,
    pub overrides: Overrides,
}

#[derive(Clone, Debug)]
pub struct CommitmentOutput {
    pub tree: CommitmentTree,
    /// Leaf order: one entry per file, same order as `tree.leaves()`.
    pub files: Vec<FileSummary>,
}

pub fn run_commitment(input: CommitmentInput<'_>) -> anyhow::Result<CommitmentOutput> {
    let resolved = resolve_settings(input.config_text, input.overrides)?;
    let workflows = driftguard_repo::load_workflow_set(input.repo_root, &resolved.workflows_dir)
        .context("load workflows")?;

    let tree = CommitmentTree::from_workflows(&workflows);
    let files = workflows
        .files
        .iter()
        .map(|f| FileSummary {
            path: f.path.clone(),
            hash: f.content_hash(),
        })
        .collect();

    Ok(CommitmentOutput { tree, files })
}

/// Root on the first line; with `show_leaves`, one `hash  path` line per leaf after it.
pub fn format_commitment(output: &CommitmentOutput, show_leaves: bool) -> String {
    let mut out = String::new();
    out.push_str(output.tree.root());
    out.push('\n');
    if show_leaves {
        for file in &output.files {
            out.push_str(&format!("{}  {}\n", file.hash, file.path));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftguard_domain::{combine, leaf_hash};

    #[test]
    fn root_covers_workflows_in_sorted_order() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let dir = root.join(".github/workflows");
        std::fs::create_dir_all(&dir).expect("mkdir");
        std::fs::write(dir.join("b.yml"), "b").expect("write");
        std::fs::write(dir.join("a.yml"), "a").expect("write");

        let output = run_commitment(CommitmentInput {
            repo_root: root,
            config_text: "",
            overrides: Overrides::default(),
        })
        .expect("commitment");

        assert_eq!(output.tree.root(), combine(&leaf_hash(b"a"), &leaf_hash(b"b")));
        assert_eq!(output.files[0].path.as_str(), ".github/workflows/a.yml");

        let text = format_commitment(&output, true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], output.tree.root());
        assert!(lines[1].ends_with("  .github/workflows/a.yml"));

        assert_eq!(format_commitment(&output, false).lines().count(), 1);
    }
}
