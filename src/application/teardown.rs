//! Teardown
//!
//! Removes one deployment from its host: the container or compose stack and
//! its image, the nginx site, and the remote directory. Every step tolerates
//! the thing already being gone, so a partial teardown can simply be rerun.

use crate::domain::entities::{
    site_available_path, site_enabled_path, BuildDescriptor, TeardownTarget,
};
use crate::domain::ports::{DeployLog, RemoteShell};
use crate::domain::value_objects::RemoteCommand;
use crate::error::{DeployError, DeployResult};

use super::connectivity::test_connection;
use super::container::{descriptor_from_listing, is_absent, ContainerCommands};
use super::provision::has_command;
use super::proxy::{nginx_check, nginx_reload};
use super::run_remote;

/// What teardown actually found and removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub removed_stack: bool,
    pub removed_container: bool,
    pub removed_image: bool,
    pub reloaded_proxy: bool,
}

pub struct Teardown<'a> {
    shell: &'a dyn RemoteShell,
    log: &'a dyn DeployLog,
}

impl<'a> Teardown<'a> {
    pub fn new(shell: &'a dyn RemoteShell, log: &'a dyn DeployLog) -> Self {
        Self { shell, log }
    }

    pub fn run(&self, target: &TeardownTarget) -> DeployResult<TeardownReport> {
        test_connection(self.shell, self.log)?;

        let mut report = TeardownReport::default();
        let commands = ContainerCommands::new(target.project_name(), target.remote_dir());

        let listing = run_remote(self.shell, &commands.list_dir(), None)?;
        match descriptor_from_listing(&listing) {
            Some(BuildDescriptor::Compose { file }) => {
                self.log.info(&format!("Stopping compose stack {}", target.project_name()));
                let down = commands
                    .compose(&file)
                    .args(["down", "--remove-orphans", "--rmi", "local"]);
                report.removed_stack = self.tolerate(&down)?;
            }
            _ => {
                self.log.info(&format!("Removing container {}", target.project_name()));
                report.removed_container =
                    self.tolerate(&commands.stop())? & self.tolerate(&commands.remove())?;
                report.removed_image = self.tolerate(&commands.remove_image())?;
            }
        }

        report.reloaded_proxy = self.remove_site(target.project_name())?;

        self.log.info(&format!("Removing {}", target.remote_dir()));
        self.require(&RemoteCommand::sudo("rm").args(["-rf", target.remote_dir()]))?;

        self.log.success(&format!(
            "{} removed from {}",
            target.project_name(),
            target.session().host()
        ));
        Ok(report)
    }

    fn remove_site(&self, site: &str) -> DeployResult<bool> {
        self.log.info(&format!("Removing nginx site {}", site));
        self.require(&RemoteCommand::sudo("rm").args([
            "-f".to_string(),
            site_enabled_path(site),
            site_available_path(site),
        ]))?;

        let has_nginx = run_remote(self.shell, &has_command("nginx"), None)?.success();
        if !has_nginx {
            self.log.info("nginx not installed; nothing to reload");
            return Ok(false);
        }

        self.require(&nginx_check())?;
        let active = run_remote(
            self.shell,
            &RemoteCommand::new("systemctl").args(["is-active", "--quiet", "nginx"]),
            None,
        )?
        .success();
        if active {
            self.require(&nginx_reload())?;
        }
        Ok(active)
    }

    /// Run a removal; "already gone" and other failures are logged, not fatal
    fn tolerate(&self, command: &RemoteCommand) -> DeployResult<bool> {
        let output = run_remote(self.shell, command, None)?;
        if output.success() {
            return Ok(true);
        }
        if is_absent(&output) {
            self.log.info(&format!("Already gone: {}", command));
        } else {
            self.log
                .warning(&format!("{} failed: {}", command, output.combined()));
        }
        Ok(false)
    }

    fn require(&self, command: &RemoteCommand) -> DeployResult<()> {
        let output = run_remote(self.shell, command, None)?;
        if !output.success() {
            return Err(DeployError::Teardown(format!(
                "{} failed: {}",
                command,
                output.combined()
            )));
        }
        Ok(())
    }
}
