//! Pure workflow evaluation (no IO).
//!
//! Input: an ordered workflow set and a resolved governance policy, both constructed elsewhere.
//! Output: a Merkle commitment over the workflow contents, violations, and the compliance report.

#![forbid(unsafe_code)]

pub mod checks;
pub mod commitment;
pub mod model;
pub mod policy;
pub mod report;

mod engine;
mod fingerprint;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use commitment::{CommitmentTree, combine, leaf_hash, merkle_root};
pub use engine::{ScanOutcome, evaluate};
pub use report::{assemble, scan};
