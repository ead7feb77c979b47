use git2::{Diff, DiffOptions, ObjectType, Repository, Tree};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git operation failed: {0}")]
    GitOperationFailed(#[from] git2::Error),

    #[error("No commits in repository")]
    NoCommits,

    #[error("Cannot resolve branch: {0}")]
    BranchNotFound(String),
}

/// Utility for capturing git diffs as unified patches.
pub struct DiffCapture;

impl Default for DiffCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffCapture {
    pub fn new() -> Self {
        Self
    }

    /// Capture the staged changes (index vs HEAD) as a patch.
    ///
    /// An empty repository with no commits diffs against the empty tree,
    /// so freshly staged files still show up.
    pub fn staged_diff(&self, working_dir: &Path) -> Result<String, GitError> {
        let repo = Repository::discover(working_dir)?;

        let head_tree = match repo.head() {
            Ok(head) => Some(head.peel_to_tree()?),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
            Err(e) => return Err(GitError::GitOperationFailed(e)),
        };

        let mut opts = DiffOptions::new();
        let diff = repo.diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))?;

        let patch = render_patch(&diff)?;
        debug!(diff_len = patch.len(), "Captured staged diff");
        Ok(patch)
    }

    /// Name of the branch HEAD points at.
    pub fn current_branch(&self, working_dir: &Path) -> Result<String, GitError> {
        let repo = Repository::discover(working_dir)?;

        let head = match repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                return Err(GitError::NoCommits)
            }
            Err(e) => return Err(GitError::GitOperationFailed(e)),
        };

        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    /// Capture the diff from a comparison branch to the current branch.
    pub fn branch_diff(&self, working_dir: &Path, compare: &str) -> Result<String, GitError> {
        let repo = Repository::discover(working_dir)?;

        let compare_tree = branch_tree(&repo, compare)?;
        let current_tree = match repo.head() {
            Ok(head) => head.peel_to_tree()?,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                return Err(GitError::NoCommits)
            }
            Err(e) => return Err(GitError::GitOperationFailed(e)),
        };

        let mut opts = DiffOptions::new();
        let diff =
            repo.diff_tree_to_tree(Some(&compare_tree), Some(&current_tree), Some(&mut opts))?;

        let patch = render_patch(&diff)?;
        debug!(
            compare,
            diff_len = patch.len(),
            "Captured branch diff"
        );
        Ok(patch)
    }
}

fn branch_tree<'r>(repo: &'r Repository, name: &str) -> Result<Tree<'r>, GitError> {
    let object = repo
        .revparse_single(name)
        .map_err(|_| GitError::BranchNotFound(name.to_string()))?;
    object
        .peel(ObjectType::Tree)?
        .into_tree()
        .map_err(|_| GitError::BranchNotFound(name.to_string()))
}

/// Render a diff in unified patch format, line origin markers included.
fn render_patch(diff: &Diff) -> Result<String, GitError> {
    let mut patch = String::new();

    diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
        let prefix = match line.origin() {
            '+' => "+",
            '-' => "-",
            ' ' => " ",
            // Hunk and file headers carry their own text
            _ => "",
        };

        patch.push_str(prefix);

        if let Ok(content) = std::str::from_utf8(line.content()) {
            patch.push_str(content);
        }

        true
    })?;

    Ok(patch)
}
