//! Fuzz target for governance manifest validation.
//!
//! Goal: validation **never panics** on any input. Parse errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_manifest_validation
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(result) = driftguard_settings::validate_manifest(text)
    {
        assert_eq!(result.summary.is_some(), result.errors.is_empty());
    }
});
