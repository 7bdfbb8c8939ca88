//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_WORKFLOWS_THIN_CALLER: &str = "workflows.thin_caller";
pub const CHECK_WORKFLOWS_REQUIRED_FILES: &str = "workflows.required_files";

// Codes: workflows.thin_caller
pub const CODE_BESPOKE_RUN_COMMAND: &str = "bespoke_run_command";

// Codes: workflows.required_files
pub const CODE_MISSING_REQUIRED_FILE: &str = "missing_required_file";

// Scan warnings (never violations)
pub const WARN_UNREADABLE_FILE: &str = "unreadable_file";
pub const WARN_INVALID_UTF8: &str = "invalid_utf8";
