//! # code-smells-git
//!
//! Git diff capture for the code-smells analyzer.
//!
//! Two diffs feed an analysis: the staged changes (`commit` flow) and the
//! difference between the current branch and a comparison branch (`pr`
//! flow). Both are rendered as unified patches, the format the model is
//! prompted with. An empty patch means there is nothing to analyze.

mod diff;

pub use diff::{DiffCapture, GitError};
