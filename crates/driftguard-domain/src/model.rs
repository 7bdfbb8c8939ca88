use crate::commitment::leaf_hash;
use driftguard_types::RepoPath;

/// Raw content of one workflow file as handed over by the repo adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileContent {
    Bytes(Vec<u8>),
    /// The file was listed but could not be read.
    Unreadable { reason: String },
}

/// Why a file's text could not be scanned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextError {
    Unreadable(String),
    InvalidUtf8 { valid_up_to: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkflowFile {
    pub path: RepoPath,
    pub content: FileContent,
}

impl WorkflowFile {
    pub fn new(path: impl AsRef<str>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: RepoPath::new(path),
            content: FileContent::Bytes(bytes.into()),
        }
    }

    pub fn unreadable(path: impl AsRef<str>, reason: impl Into<String>) -> Self {
        Self {
            path: RepoPath::new(path),
            content: FileContent::Unreadable {
                reason: reason.into(),
            },
        }
    }

    pub fn file_name(&self) -> &str {
        self.path.file_name()
    }

    /// Bytes that feed the commitment. Unreadable files commit as empty content.
    pub fn bytes(&self) -> &[u8] {
        match &self.content {
            FileContent::Bytes(b) => b,
            FileContent::Unreadable { .. } => &[],
        }
    }

    pub fn content_hash(&self) -> String {
        leaf_hash(self.bytes())
    }

    pub fn text(&self) -> Result<&str, TextError> {
        match &self.content {
            FileContent::Bytes(b) => std::str::from_utf8(b).map_err(|e| TextError::InvalidUtf8 {
                valid_up_to: e.valid_up_to(),
            }),
            FileContent::Unreadable { reason } => Err(TextError::Unreadable(reason.clone())),
        }
    }
}

/// Ordered workflow snapshot. Order is the caller's (the repo adapter sorts by path).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkflowSet {
    pub files: Vec<WorkflowFile>,
}

impl WorkflowSet {
    pub fn new(files: Vec<WorkflowFile>) -> Self {
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains_file_name(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.file_name() == name)
    }
}

impl FromIterator<WorkflowFile> for WorkflowSet {
    fn from_iter<T: IntoIterator<Item = WorkflowFile>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::EMPTY_ROOT;

    #[test]
    fn unreadable_file_hashes_as_empty_content() {
        let f = WorkflowFile::unreadable(".github/workflows/x.yml", "permission denied");
        assert_eq!(f.content_hash(), EMPTY_ROOT);
        assert_eq!(
            f.text(),
            Err(TextError::Unreadable("permission denied".to_string()))
        );
    }

    #[test]
    fn invalid_utf8_reports_offset() {
        let f = WorkflowFile::new("bad.yml", vec![b'a', 0xff, b'b']);
        assert_eq!(f.text(), Err(TextError::InvalidUtf8 { valid_up_to: 1 }));
    }

    #[test]
    fn file_name_lookup_ignores_directories() {
        let set: WorkflowSet = [WorkflowFile::new(".github/workflows/policy.yml", "")]
            .into_iter()
            .collect();
        assert!(set.contains_file_name("policy.yml"));
        assert!(!set.contains_file_name(".github/workflows/policy.yml"));
    }
}
