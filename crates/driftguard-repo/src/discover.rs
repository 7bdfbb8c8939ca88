use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use driftguard_types::RepoPath;
use globset::{Glob, GlobMatcher};
use walkdir::WalkDir;

/// File names treated as workflows (`.yml`, `.yaml`).
pub const WORKFLOW_GLOB: &str = "*.y*ml";

/// Discover workflow files directly inside `repo_root/workflows_dir`.
///
/// Behavior:
/// - Only immediate children are considered; subdirectories are not searched.
/// - Matching entries that cannot be inspected are still listed.
/// - A missing directory yields an empty list (a repo without workflows is still scannable).
/// - Results are repo-relative and sorted lexicographically.
pub fn discover_workflows(
    repo_root: &Utf8Path,
    workflows_dir: &str,
) -> anyhow::Result<Vec<RepoPath>> {
    let dir = repo_root.join(workflows_dir);
    if !dir.is_dir() {
        tracing::debug!(dir = %dir, "workflow directory not found");
        return Ok(Vec::new());
    }

    let matcher = workflow_matcher().context("compile workflow glob")?;
    let base = RepoPath::new(workflows_dir);

    let mut out: Vec<RepoPath> = Vec::new();
    for entry in WalkDir::new(&dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let (path, inspect_error) = match entry {
            Ok(entry) if entry.file_type().is_file() => (entry.into_path(), None),
            Ok(_) => continue,
            // An entry that is listed but cannot be inspected (dangling symlink, stat
            // failure) stays in the set; the loader records it as unreadable.
            Err(err) => {
                let Some(path) = err
                    .path()
                    .filter(|_| err.depth() > 0)
                    .map(|p| p.to_path_buf())
                else {
                    return Err(err).with_context(|| format!("list workflow directory {dir}"));
                };
                (path, Some(err))
            }
        };

        let Some(name) = pathbuf_to_utf8(&path).and_then(|p| p.file_name().map(str::to_string))
        else {
            continue;
        };
        if !matcher.is_match(&name) {
            continue;
        }
        if let Some(err) = inspect_error {
            tracing::warn!(file = %name, error = %err, "cannot inspect workflow entry");
        }
        out.push(base.join(&name));
    }

    // Stable order.
    out.sort();
    out.dedup();

    tracing::debug!(dir = %dir, count = out.len(), "discovered workflows");
    Ok(out)
}

fn workflow_matcher() -> anyhow::Result<GlobMatcher> {
    Ok(Glob::new(WORKFLOW_GLOB)?.compile_matcher())
}

fn pathbuf_to_utf8(path: &std::path::Path) -> Option<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).ok()
}
