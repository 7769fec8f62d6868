//! Source Control Port
//!
//! The git operations repository sync needs. Implementations must never
//! write the authenticated URL anywhere: not into `.git/config`, not into a
//! process argument list.

use std::path::Path;

use thiserror::Error;

use crate::domain::value_objects::{AuthenticatedRemote, BranchName};

#[derive(Error, Debug)]
#[error("git {operation}: {detail}")]
pub struct GitError {
    pub operation: &'static str,
    pub detail: String,
}

impl GitError {
    pub fn new(operation: &'static str, detail: impl Into<String>) -> Self {
        Self {
            operation,
            detail: detail.into(),
        }
    }
}

pub trait SourceControl {
    /// Clone `remote` into `dest` (which must not exist)
    fn clone_repo(&self, remote: &AuthenticatedRemote, dest: &Path) -> Result<(), GitError>;

    /// Point `origin` at `url`
    fn set_remote_url(&self, repo: &Path, url: &str) -> Result<(), GitError>;

    fn fetch(&self, repo: &Path, remote: &AuthenticatedRemote) -> Result<(), GitError>;

    /// Check out `branch`, creating a tracking branch from `origin` if needed
    fn checkout(&self, repo: &Path, branch: &BranchName) -> Result<(), GitError>;

    /// Fast-forward `branch` from `origin`
    fn pull(
        &self,
        repo: &Path,
        remote: &AuthenticatedRemote,
        branch: &BranchName,
    ) -> Result<(), GitError>;
}
