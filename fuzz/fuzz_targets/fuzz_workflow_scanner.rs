//! Fuzz target for the inline `run:` line scanner.
//!
//! Goal: scanning **never panics**, and reported lines are strictly increasing
//! and within the input's line count.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_workflow_scanner
//! ```

#![no_main]

use driftguard_domain::checks::scan_lines;
use driftguard_domain::model::{WorkflowFile, WorkflowSet};
use driftguard_domain::policy::GovernancePolicy;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let lines = scan_lines(text);
        let total = text.lines().count() as u32;
        assert!(lines.windows(2).all(|w| w[0] < w[1]));
        assert!(lines.iter().all(|&n| n >= 1 && n <= total));
    }

    // Non-UTF-8 input must become a warning, never a panic.
    let set = WorkflowSet::new(vec![WorkflowFile::new(".github/workflows/fuzz.yml", data)]);
    let outcome = driftguard_domain::evaluate(&set, &GovernancePolicy::default());
    assert!(outcome.violations.len() + outcome.warnings.len() <= 1);
});
