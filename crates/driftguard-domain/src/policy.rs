/// Governance parameters for one scan.
///
/// Already typed and validated by `driftguard-settings`; the engine never re-validates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GovernancePolicy {
    /// File names exempt from inline-command scanning.
    pub allowlist: Vec<String>,
    /// File names that must be present in the workflow set.
    pub required_files: Vec<String>,
}

impl GovernancePolicy {
    pub fn new<A, R>(allowlist: A, required_files: R) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            allowlist: allowlist.into_iter().map(Into::into).collect(),
            required_files: required_files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_allowlisted(&self, file_name: &str) -> bool {
        self.allowlist.iter().any(|a| a == file_name)
    }
}
