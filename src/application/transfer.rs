//! Artifact Transfer
//!
//! Prepares `/opt/<name>` for the SSH user and mirrors the working copy into it.

use std::path::Path;

use crate::domain::ports::{DeployLog, FileTransfer, RemoteShell};
use crate::domain::value_objects::{RemoteCommand, SshUser};
use crate::error::{DeployError, DeployResult};

use super::run_remote;

pub struct ArtifactTransfer<'a> {
    shell: &'a dyn RemoteShell,
    transfer: &'a dyn FileTransfer,
    log: &'a dyn DeployLog,
}

impl<'a> ArtifactTransfer<'a> {
    pub fn new(
        shell: &'a dyn RemoteShell,
        transfer: &'a dyn FileTransfer,
        log: &'a dyn DeployLog,
    ) -> Self {
        Self {
            shell,
            transfer,
            log,
        }
    }

    pub fn transfer(&self, local_dir: &Path, remote_dir: &str, owner: &SshUser) -> DeployResult<()> {
        self.prepare(remote_dir, owner)?;

        self.log.info(&format!(
            "Copying {} to {}:{} with {}",
            local_dir.display(),
            self.shell.destination(),
            remote_dir,
            self.transfer.name()
        ));
        self.transfer
            .transfer(local_dir, remote_dir)
            .map_err(|e| DeployError::Transfer(e.to_string()))?;

        self.log.success("Files transferred");
        Ok(())
    }

    fn prepare(&self, remote_dir: &str, owner: &SshUser) -> DeployResult<()> {
        let steps = [
            RemoteCommand::sudo("mkdir").args(["-p", remote_dir]),
            // `user:` also sets the group to the user's login group
            RemoteCommand::sudo("chown").args([format!("{}:", owner), remote_dir.to_string()]),
        ];
        for command in &steps {
            let output = run_remote(self.shell, command, None)?;
            if !output.success() {
                return Err(DeployError::Transfer(format!(
                    "cannot prepare {}: {}",
                    remote_dir,
                    output.combined()
                )));
            }
        }
        Ok(())
    }
}
