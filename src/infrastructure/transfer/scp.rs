//! SCP Transfer Strategy
//!
//! Fallback when rsync is not available. scp cannot delete stale files, so
//! the remote directory is emptied over SSH first and then every top-level
//! entry of the working copy is copied recursively.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::entities::RemoteSession;
use crate::domain::ports::{FileTransfer, RemoteShell, TransferError};
use crate::domain::value_objects::RemoteCommand;
use crate::infrastructure::ssh::{SshOptions, SshShell};

pub struct ScpTransfer {
    session: RemoteSession,
    options: SshOptions,
}

impl ScpTransfer {
    pub fn new(session: RemoteSession, options: SshOptions) -> Self {
        Self { session, options }
    }

    /// Check if scp is installed and available
    pub fn check_available() -> bool {
        // scp without args returns non-zero, but if we can spawn it, it's available
        Command::new("scp")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    /// Remove everything inside the remote directory, keeping the directory
    fn clear_remote_dir(&self, remote_dir: &str) -> Result<(), TransferError> {
        let shell = SshShell::new(self.session.clone(), self.options.clone());
        let output = shell
            .run(
                &RemoteCommand::new("find").args([remote_dir, "-mindepth", "1", "-delete"]),
                None,
            )
            .map_err(|e| TransferError::CommandFailed(e.to_string()))?;

        if !output.success() {
            return Err(TransferError::CommandFailed(format!(
                "failed to clear {}: {}",
                remote_dir,
                output.combined()
            )));
        }
        Ok(())
    }

    fn command(&self, entries: &[PathBuf], remote_dir: &str) -> Command {
        let mut cmd = Command::new("scp");
        cmd.arg("-r")
            .arg("-p")
            .args(self.options.client_args(&self.session, "-P"))
            .args(entries)
            .arg(format!(
                "{}:{}/",
                self.session.destination(),
                remote_dir.trim_end_matches('/')
            ));
        cmd
    }
}

/// Top-level entries of `dir`, dotfiles included, in a stable order
fn top_level_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

impl FileTransfer for ScpTransfer {
    fn name(&self) -> &'static str {
        "scp"
    }

    fn transfer(&self, local_dir: &Path, remote_dir: &str) -> Result<(), TransferError> {
        tracing::debug!(local = %local_dir.display(), remote_dir, "scp");

        self.clear_remote_dir(remote_dir)?;

        let entries = top_level_entries(local_dir)?;
        if entries.is_empty() {
            return Ok(());
        }

        let output = self
            .command(&entries, remote_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        if !output.status.success() {
            return Err(TransferError::CommandFailed(format!(
                "scp failed with exit code {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}
