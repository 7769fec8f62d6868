//! Connectivity probe: one `echo` round trip before anything else touches the host.

use crate::domain::ports::{DeployLog, RemoteShell};
use crate::domain::value_objects::RemoteCommand;
use crate::error::{DeployError, DeployResult};

use super::run_remote;

/// Text echoed back by a healthy channel
pub const PROBE_MARKER: &str = "hoist-connection-ok";

pub fn test_connection(shell: &dyn RemoteShell, log: &dyn DeployLog) -> DeployResult<()> {
    let destination = shell.destination();
    log.info(&format!("Testing SSH connection to {}", destination));

    let output = run_remote(shell, &RemoteCommand::new("echo").arg(PROBE_MARKER), None)?;
    if !output.success() || !output.stdout.contains(PROBE_MARKER) {
        return Err(DeployError::Connectivity {
            destination,
            detail: output.combined(),
        });
    }

    log.success(&format!("SSH connection to {} works", destination));
    Ok(())
}
