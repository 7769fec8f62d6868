//! Git CLI Source Control
//!
//! Implements the SourceControl port with the local `git` binary.
//!
//! The authenticated URL never reaches argv or `.git/config`. For operations
//! that talk to the remote, git is told through its environment to rewrite the
//! plain URL (`url.<authenticated>.insteadOf = <plain>`), so the repository's
//! recorded remote stays the plain URL.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::domain::ports::{GitError, SourceControl};
use crate::domain::value_objects::{AuthenticatedRemote, BranchName};

pub struct GitCli {
    program: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Base command: never prompt, never pick up a credential helper's UI
    fn command(&self, repo: Option<&Path>) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(repo) = repo {
            cmd.arg("-C").arg(repo);
        }
        cmd.env("GIT_TERMINAL_PROMPT", "0")
            .env("GCM_INTERACTIVE", "never")
            .stdin(Stdio::null());
        cmd
    }

    /// Attach the per-process URL rewrite for one remote operation
    fn with_remote(cmd: &mut Command, remote: &AuthenticatedRemote) {
        if let Some(authenticated) = remote.authenticated_url() {
            cmd.env("GIT_CONFIG_COUNT", "1")
                .env("GIT_CONFIG_KEY_0", format!("url.{}.insteadOf", authenticated))
                .env("GIT_CONFIG_VALUE_0", remote.plain());
        }
    }

    fn run(
        &self,
        operation: &'static str,
        mut cmd: Command,
        remote: Option<&AuthenticatedRemote>,
    ) -> Result<(), GitError> {
        tracing::debug!(operation, "git");

        let output = cmd
            .output()
            .map_err(|e| GitError::new(operation, format!("failed to run git: {}", e)))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = match remote {
            Some(remote) => scrub(stderr.trim(), remote),
            None => stderr.trim().to_string(),
        };
        Err(GitError::new(operation, detail))
    }
}

/// Replace any echo of the authenticated URL with the plain one
fn scrub(text: &str, remote: &AuthenticatedRemote) -> String {
    match remote.authenticated_url() {
        Some(authenticated) => text.replace(authenticated, remote.plain()),
        None => text.to_string(),
    }
}

impl SourceControl for GitCli {
    fn clone_repo(&self, remote: &AuthenticatedRemote, dest: &Path) -> Result<(), GitError> {
        let mut cmd = self.command(None);
        cmd.arg("clone").arg("--quiet").arg(remote.plain()).arg(dest);
        Self::with_remote(&mut cmd, remote);
        self.run("clone", cmd, Some(remote))
    }

    fn set_remote_url(&self, repo: &Path, url: &str) -> Result<(), GitError> {
        let mut cmd = self.command(Some(repo));
        cmd.args(["remote", "set-url", "origin", url]);
        self.run("remote set-url", cmd, None)
    }

    fn fetch(&self, repo: &Path, remote: &AuthenticatedRemote) -> Result<(), GitError> {
        let mut cmd = self.command(Some(repo));
        cmd.args(["fetch", "--quiet", "--prune", "origin"]);
        Self::with_remote(&mut cmd, remote);
        self.run("fetch", cmd, Some(remote))
    }

    fn checkout(&self, repo: &Path, branch: &BranchName) -> Result<(), GitError> {
        let mut cmd = self.command(Some(repo));
        // trailing `--` keeps git from reading the branch as a path
        cmd.args(["checkout", "--quiet", branch.as_str(), "--"]);
        self.run("checkout", cmd, None)
    }

    fn pull(
        &self,
        repo: &Path,
        remote: &AuthenticatedRemote,
        branch: &BranchName,
    ) -> Result<(), GitError> {
        let mut cmd = self.command(Some(repo));
        cmd.args(["pull", "--quiet", "--ff-only", "origin", branch.as_str()]);
        Self::with_remote(&mut cmd, remote);
        self.run("pull", cmd, Some(remote))
    }
}
