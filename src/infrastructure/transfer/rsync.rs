//! Rsync Transfer Strategy
//!
//! Mirrors the working copy into the remote directory, deleting remote files
//! that no longer exist locally.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::domain::entities::RemoteSession;
use crate::domain::ports::{FileTransfer, TransferError};
use crate::infrastructure::ssh::SshOptions;

pub struct RsyncTransfer {
    session: RemoteSession,
    options: SshOptions,
}

impl RsyncTransfer {
    pub fn new(session: RemoteSession, options: SshOptions) -> Self {
        Self { session, options }
    }

    /// Check if rsync is installed and available
    pub fn check_available() -> bool {
        Command::new("rsync")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn command(&self, local_dir: &Path, remote_dir: &str) -> Command {
        let mut cmd = Command::new("rsync");
        cmd.arg("-az")
            .arg("--delete")
            .arg("-e")
            .arg(self.options.remote_shell_spec(&self.session))
            // trailing slashes: copy contents, not the directory itself
            .arg(format!("{}/", local_dir.display()))
            .arg(format!(
                "{}:{}/",
                self.session.destination(),
                remote_dir.trim_end_matches('/')
            ));
        cmd
    }
}

impl FileTransfer for RsyncTransfer {
    fn name(&self) -> &'static str {
        "rsync"
    }

    fn transfer(&self, local_dir: &Path, remote_dir: &str) -> Result<(), TransferError> {
        tracing::debug!(local = %local_dir.display(), remote_dir, "rsync");

        let output = self
            .command(local_dir, remote_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        if !output.status.success() {
            return Err(TransferError::CommandFailed(format!(
                "rsync failed with exit code {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{RemoteHost, SshUser};

    fn transfer() -> RsyncTransfer {
        RsyncTransfer::new(
            RemoteSession::new(
                SshUser::parse("deploy").unwrap(),
                RemoteHost::parse("10.0.0.5").unwrap(),
                "/keys/id",
            ),
            SshOptions::default(),
        )
    }

    #[test]
    fn rsync_transfer_name() {
        assert_eq!(transfer().name(), "rsync");
    }

    #[test]
    fn check_available_does_not_panic() {
        let _ = RsyncTransfer::check_available();
    }

    #[test]
    fn command_mirrors_contents_with_delete() {
        let cmd = transfer().command(Path::new("/work/app"), "/opt/app");
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(args[0], "-az");
        assert_eq!(args[1], "--delete");
        assert_eq!(args[2], "-e");
        assert!(args[3].starts_with("ssh -i /keys/id -p 22 -o BatchMode=yes"));
        assert_eq!(args[4], "/work/app/");
        assert_eq!(args[5], "deploy@10.0.0.5:/opt/app/");
    }
}
