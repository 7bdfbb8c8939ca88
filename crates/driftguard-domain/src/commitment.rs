//! Merkle commitment over an ordered set of workflow contents.
//!
//! Leaves are lowercase hex SHA-256 digests. Parents hash the *text* of the two
//! child hex strings concatenated (left then right), not the decoded digest
//! bytes. Existing commitments depend on that representation.

use crate::model::WorkflowSet;
use sha2::{Digest, Sha256};

/// Root of an empty commitment: SHA-256 of the empty byte string.
pub const EMPTY_ROOT: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Hex-encoded SHA-256 of one file's bytes.
pub fn leaf_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Parent node for a pair of hex-encoded children.
pub fn combine(left: &str, right: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    hex::encode(hasher.finalize())
}

/// Fold an ordered leaf sequence into a single root.
///
/// - empty input yields [`EMPTY_ROOT`]
/// - an odd level duplicates its last node, at every level (so a single leaf
///   is combined with itself)
pub fn merkle_root<S: AsRef<str>>(leaves: &[S]) -> String {
    if leaves.is_empty() {
        return leaf_hash(b"");
    }

    let mut level: Vec<String> = leaves.iter().map(|l| l.as_ref().to_string()).collect();
    loop {
        if level.len() % 2 == 1
            && let Some(last) = level.last().cloned()
        {
            level.push(last);
        }

        level = level
            .chunks_exact(2)
            .map(|pair| combine(&pair[0], &pair[1]))
            .collect();

        if let [root] = level.as_slice() {
            return root.clone();
        }
    }
}

/// Ordered leaves and the root derived from them. Never mutated after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitmentTree {
    leaves: Vec<String>,
    root: String,
}

impl CommitmentTree {
    pub fn from_leaves(leaves: Vec<String>) -> Self {
        let root = merkle_root(&leaves);
        Self { leaves, root }
    }

    pub fn from_contents<'a, I>(contents: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        Self::from_leaves(contents.into_iter().map(leaf_hash).collect())
    }

    /// Commit to a workflow set in its given order.
    pub fn from_workflows(workflows: &WorkflowSet) -> Self {
        Self::from_leaves(workflows.files.iter().map(|f| f.content_hash()).collect())
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn leaves(&self) -> &[String] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}
