//! Host Provisioning
//!
//! Makes sure the container runtime, compose tool, nginx and curl are
//! installed and running. A package is only installed when its command is
//! missing, so hosts that already carry Docker CE or a hand-built nginx keep
//! them. `systemctl enable --now` on an active unit is a no-op, and
//! `usermod -aG` on an existing member changes nothing.

use crate::domain::ports::{DeployLog, RemoteShell};
use crate::domain::value_objects::{RemoteCommand, SshUser};
use crate::error::{Dependency, DeployError, DeployResult};

use super::run_remote;

/// One privileged provisioning command and what it is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionStep {
    pub dependency: Dependency,
    pub description: String,
    pub command: RemoteCommand,
    /// Unprivileged check that succeeds when there is nothing to do
    pub satisfied_by: Option<RemoteCommand>,
}

impl ProvisionStep {
    fn new(dependency: Dependency, description: impl Into<String>, command: RemoteCommand) -> Self {
        Self {
            dependency,
            description: description.into(),
            command,
            satisfied_by: None,
        }
    }

    fn unless(self, check: RemoteCommand) -> Self {
        Self {
            satisfied_by: Some(check),
            ..self
        }
    }
}

fn apt_get(args: &[&str]) -> RemoteCommand {
    RemoteCommand::sudo("env")
        .args(["DEBIAN_FRONTEND=noninteractive", "apt-get", "-q", "-y"])
        .args(args.iter().copied())
}

/// Install `package` unless `binary` is already on the PATH
fn install(dependency: Dependency, package: &str, binary: &str) -> ProvisionStep {
    ProvisionStep::new(
        dependency,
        format!("installing {}", package),
        apt_get(&["install", "--no-upgrade", package]),
    )
    .unless(has_command(binary))
}

pub fn has_command(binary: &str) -> RemoteCommand {
    RemoteCommand::new("sh").args(["-c".to_string(), format!("command -v {}", binary)])
}

fn enable(service: &str) -> RemoteCommand {
    RemoteCommand::sudo("systemctl").args(["enable", "--now", service])
}

pub struct EnvironmentProvisioner<'a> {
    shell: &'a dyn RemoteShell,
    log: &'a dyn DeployLog,
}

impl<'a> EnvironmentProvisioner<'a> {
    pub fn new(shell: &'a dyn RemoteShell, log: &'a dyn DeployLog) -> Self {
        Self { shell, log }
    }

    /// Ordered steps for `user`
    pub fn plan(user: &SshUser) -> Vec<ProvisionStep> {
        vec![
            ProvisionStep::new(Dependency::PackageIndex, "refreshing package index", apt_get(&["update"])),
            install(Dependency::ContainerRuntime, "docker.io", "docker"),
            install(Dependency::ComposeTool, "docker-compose", "docker-compose"),
            install(Dependency::ReverseProxy, "nginx", "nginx"),
            install(Dependency::HttpClient, "curl", "curl"),
            ProvisionStep::new(Dependency::ContainerRuntime, "enabling docker", enable("docker")),
            ProvisionStep::new(Dependency::ReverseProxy, "enabling nginx", enable("nginx")),
            ProvisionStep::new(
                Dependency::RuntimePermission,
                format!("adding {} to the docker group", user),
                RemoteCommand::sudo("usermod").args(["-aG", "docker", user.as_str()]),
            ),
        ]
    }

    pub fn provision(&self, user: &SshUser) -> DeployResult<()> {
        for step in Self::plan(user) {
            if let Some(check) = &step.satisfied_by {
                if run_remote(self.shell, check, None)?.success() {
                    self.log.info(&format!("Provisioning: {} already present", step.dependency));
                    continue;
                }
            }
            self.log.info(&format!("Provisioning: {}", step.description));
            let output = run_remote(self.shell, &step.command, None)?;
            if !output.success() {
                return Err(DeployError::Provisioning {
                    dependency: step.dependency,
                    detail: output.combined(),
                });
            }
        }
        self.log.success("Host provisioned");
        Ok(())
    }
}
