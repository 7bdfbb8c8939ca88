use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a violation.
///
/// Identity fields:
/// - check_id
/// - code
/// - subject (repo-relative file path, or the missing file name)
///
/// Line numbers are not part of the identity.
pub fn fingerprint_for_violation(check_id: &str, code: &str, subject: &str) -> String {
    let canonical = [check_id, code, subject].join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
