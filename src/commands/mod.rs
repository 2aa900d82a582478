//! Command implementations
//!
//! Split the way git splits them:
//!
//! - `plumbing`: direct object/index/ref manipulation (hash-object,
//!   cat-file, update-index, write-tree, commit-tree, update-ref, ls-files)
//! - `porcelain`: user-facing workflows (init)
//!
//! Commands implement no binary-format logic of their own; they compose the
//! areas and print.

pub mod plumbing;
pub mod porcelain;
