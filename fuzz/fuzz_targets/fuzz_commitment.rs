//! Fuzz target for the Merkle commitment.
//!
//! Goal: any ordered set of contents yields a 64-char lowercase hex root, and
//! recomputing from the leaves gives the same root.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_commitment
//! ```

#![no_main]

use arbitrary::Arbitrary;
use driftguard_domain::{CommitmentTree, merkle_root};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct CommitInput {
    files: Vec<Vec<u8>>,
}

fuzz_target!(|input: CommitInput| {
    if input.files.len() > 256 {
        return;
    }

    let tree = CommitmentTree::from_contents(input.files.iter().map(Vec::as_slice));
    assert_eq!(tree.len(), input.files.len());
    assert_eq!(tree.root().len(), 64);
    assert!(tree.root().bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    assert_eq!(merkle_root(tree.leaves()), tree.root());
});
