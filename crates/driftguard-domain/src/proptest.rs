//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Commitment determinism and order sensitivity
//! - Scanner robustness on arbitrary text
//! - Report consistency with the scan outcome

use crate::checks::scan_lines;
use crate::commitment::{CommitmentTree, merkle_root};
use crate::model::{WorkflowFile, WorkflowSet};
use crate::report::scan;
use crate::test_support::policy;
use proptest::prelude::*;
use time::macros::datetime;

// ============================================================================
// Strategies
// ============================================================================

/// Lines that look like workflow YAML, including the awkward cases.
fn arb_workflow_line() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        3 => prop::sample::select(vec![
            "steps:",
            "- run: echo hi",
            "run: make",
            "runs-on: ubuntu-latest",
            "- uses: actions/checkout@v4",
            "with:",
            "run: |",
            "# run: commented",
            "---",
            "-",
            "",
        ])
        .prop_map(String::from),
        1 => "[ -~]{0,24}",
    ];
    (0usize..10, fragment).prop_map(|(indent, text)| format!("{}{}", " ".repeat(indent), text))
}

fn arb_workflow_text() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_workflow_line(), 0..40).prop_map(|lines| lines.join("\n"))
}

fn arb_contents() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..12)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn commitment_is_deterministic(contents in arb_contents()) {
        let a = CommitmentTree::from_contents(contents.iter().map(Vec::as_slice));
        let b = CommitmentTree::from_contents(contents.iter().map(Vec::as_slice));
        prop_assert_eq!(a.root(), b.root());
        prop_assert_eq!(a.root().len(), 64);
        prop_assert!(a.root().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn swapping_distinct_leaves_changes_root(
        leaves in prop::collection::vec("[0-9a-f]{64}", 2..10),
        i in any::<prop::sample::Index>(),
        j in any::<prop::sample::Index>(),
    ) {
        let i = i.index(leaves.len());
        let j = j.index(leaves.len());
        prop_assume!(leaves[i] != leaves[j]);

        let mut swapped = leaves.clone();
        swapped.swap(i, j);
        prop_assert_ne!(merkle_root(&leaves), merkle_root(&swapped));
    }

    #[test]
    fn scanner_lines_are_increasing_and_in_range(text in arb_workflow_text()) {
        let lines = scan_lines(&text);
        let total = text.lines().count() as u32;

        prop_assert!(lines.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(lines.iter().all(|&n| n >= 1 && n <= total));
    }

    #[test]
    fn scanner_handles_arbitrary_unicode(text in "\\PC{0,256}") {
        let lines = scan_lines(&text);
        prop_assert!(lines.len() <= text.lines().count());
    }

    #[test]
    fn runs_on_never_flagged(indent in 0usize..12, value in "[a-z0-9-]{1,16}") {
        let text = format!("{}runs-on: {}", " ".repeat(indent), value);
        prop_assert!(scan_lines(&text).is_empty());
    }

    #[test]
    fn report_is_consistent_with_its_parts(
        texts in prop::collection::vec(arb_workflow_text(), 0..6),
        require_policy in any::<bool>(),
    ) {
        let workflows: WorkflowSet = texts
            .iter()
            .enumerate()
            .map(|(idx, text)| WorkflowFile::new(format!(".github/workflows/w{idx}.yml"), text.as_str()))
            .collect();
        let required: &[&str] = if require_policy { &["policy.yml"] } else { &[] };
        let report = scan("org/repo", &workflows, &policy(&[], required), datetime!(2026-01-01 00:00 UTC));

        prop_assert_eq!(report.compliant, report.violations.is_empty());
        prop_assert_eq!(report.violation_count as usize, report.violations.len());
        prop_assert_eq!(report.file_count as usize, workflows.len());
        let tree = CommitmentTree::from_workflows(&workflows);
        prop_assert_eq!(report.commitment_root.as_str(), tree.root());
    }
}
