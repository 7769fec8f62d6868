//! Container Deployment
//!
//! Replaces whatever runs under the project name with a freshly built image.
//! The remote directory decides the path: a compose file means a stack,
//! otherwise a single container built from the Dockerfile.

use std::time::Duration;

use crate::domain::entities::{BuildDescriptor, DeploymentConfig};
use crate::domain::ports::{CommandOutput, DeployLog, RemoteShell};
use crate::domain::value_objects::{AppPort, NetworkMode, RemoteCommand};
use crate::error::{DeployError, DeployResult};

use super::run_remote;

/// Lines of container output captured after start
pub const LOG_TAIL_LINES: u32 = 50;

/// What was deployed and how it looked right after start
#[derive(Debug, Clone)]
pub struct ContainerReport {
    pub descriptor: BuildDescriptor,
    pub status: String,
    pub logs: String,
}

/// Command builder for one project on the host
#[derive(Debug, Clone)]
pub struct ContainerCommands<'a> {
    name: &'a str,
    dir: &'a str,
}

impl<'a> ContainerCommands<'a> {
    pub fn new(name: &'a str, dir: &'a str) -> Self {
        Self { name, dir }
    }

    pub fn list_dir(&self) -> RemoteCommand {
        RemoteCommand::new("ls").args(["-1A", self.dir])
    }

    /// `docker-compose` bound to the project's directory, file and name
    pub fn compose(&self, file: &str) -> RemoteCommand {
        RemoteCommand::new("docker-compose").args([
            "--project-directory".to_string(),
            self.dir.to_string(),
            "-f".to_string(),
            format!("{}/{}", self.dir, file),
            "-p".to_string(),
            self.name.to_string(),
        ])
    }

    pub fn stop(&self) -> RemoteCommand {
        RemoteCommand::new("docker").args(["stop", self.name])
    }

    pub fn remove(&self) -> RemoteCommand {
        RemoteCommand::new("docker").args(["rm", self.name])
    }

    pub fn remove_image(&self) -> RemoteCommand {
        RemoteCommand::new("docker").args(["rmi", "-f", self.name])
    }

    pub fn build(&self) -> RemoteCommand {
        RemoteCommand::new("docker").args(["build", "-t", self.name, self.dir])
    }

    pub fn run(&self, port: AppPort, network: NetworkMode) -> RemoteCommand {
        let cmd = RemoteCommand::new("docker").args([
            "run",
            "-d",
            "--name",
            self.name,
            "--restart",
            "unless-stopped",
        ]);
        let cmd = match network {
            NetworkMode::Publish => cmd.args(["-p".to_string(), format!("{0}:{0}", port)]),
            NetworkMode::Host => cmd.args(["--network", "host"]),
        };
        cmd.arg(self.name)
    }

    pub fn status(&self) -> RemoteCommand {
        RemoteCommand::new("docker").args([
            "ps".to_string(),
            "-a".to_string(),
            "--filter".to_string(),
            format!("name=^{}$", self.name),
            "--format".to_string(),
            "{{.Names}}\t{{.Status}}".to_string(),
        ])
    }

    pub fn logs(&self) -> RemoteCommand {
        RemoteCommand::new("docker").args([
            "logs".to_string(),
            "--tail".to_string(),
            LOG_TAIL_LINES.to_string(),
            self.name.to_string(),
        ])
    }
}

/// Which build descriptor, if any, the listing of a directory shows
pub fn descriptor_from_listing(output: &CommandOutput) -> Option<BuildDescriptor> {
    if !output.success() {
        return None;
    }
    BuildDescriptor::from_file_names(output.stdout.lines().map(str::trim))
}

/// Remote failure output that only says the thing was already gone
pub fn is_absent(output: &CommandOutput) -> bool {
    let text = output.combined();
    text.contains("No such container") || text.contains("No such image") || text.contains("No such object")
}

pub struct ContainerDeployer<'a> {
    shell: &'a dyn RemoteShell,
    log: &'a dyn DeployLog,
    settle: Duration,
}

impl<'a> ContainerDeployer<'a> {
    pub fn new(shell: &'a dyn RemoteShell, log: &'a dyn DeployLog, settle: Duration) -> Self {
        Self { shell, log, settle }
    }

    pub fn deploy(&self, config: &DeploymentConfig) -> DeployResult<ContainerReport> {
        let commands = ContainerCommands::new(config.project_name(), config.remote_dir());

        let listing = run_remote(self.shell, &commands.list_dir(), None)?;
        let descriptor = match descriptor_from_listing(&listing) {
            Some(BuildDescriptor::Compose { file }) => BuildDescriptor::Compose { file },
            _ => BuildDescriptor::Dockerfile,
        };

        match &descriptor {
            BuildDescriptor::Compose { file } => self.deploy_stack(&commands, file)?,
            BuildDescriptor::Dockerfile => self.deploy_single(&commands, config)?,
        }

        if !self.settle.is_zero() {
            self.log.info(&format!(
                "Waiting {}s for the container to settle",
                self.settle.as_secs()
            ));
            std::thread::sleep(self.settle);
        }

        let (status, logs) = self.diagnostics(&commands, &descriptor)?;
        Ok(ContainerReport {
            descriptor,
            status,
            logs,
        })
    }

    fn deploy_single(&self, commands: &ContainerCommands<'_>, config: &DeploymentConfig) -> DeployResult<()> {
        self.log.info(&format!("Replacing container {}", config.project_name()));
        for command in [commands.stop(), commands.remove()] {
            let output = run_remote(self.shell, &command, None)?;
            if !output.success() {
                if is_absent(&output) {
                    self.log.info(&format!("No existing container {}", config.project_name()));
                    break;
                }
                self.log.warning(&format!("{} failed: {}", command, output.combined()));
            }
        }

        self.log.info(&format!("Building image {}", config.project_name()));
        let build = run_remote(self.shell, &commands.build(), None)?;
        if !build.success() {
            return Err(DeployError::Build {
                diagnostics: build.combined(),
            });
        }

        let run = run_remote(self.shell, &commands.run(config.port(), config.network()), None)?;
        if !run.success() {
            self.log_failure_context(commands, &BuildDescriptor::Dockerfile);
            return Err(DeployError::Run {
                diagnostics: run.combined(),
            });
        }
        self.log.success(&format!("Container {} started", config.project_name()));
        Ok(())
    }

    fn deploy_stack(&self, commands: &ContainerCommands<'_>, file: &str) -> DeployResult<()> {
        self.log.info(&format!("Replacing compose stack from {}", file));
        let down = run_remote(self.shell, &commands.compose(file).args(["down", "--remove-orphans"]), None)?;
        if !down.success() {
            self.log.warning(&format!("compose down failed: {}", down.combined()));
        }

        let build = run_remote(self.shell, &commands.compose(file).arg("build"), None)?;
        if !build.success() {
            return Err(DeployError::Build {
                diagnostics: build.combined(),
            });
        }

        let up = run_remote(
            self.shell,
            &commands
                .compose(file)
                .args(["up", "-d", "--build", "--force-recreate"]),
            None,
        )?;
        if !up.success() {
            self.log_failure_context(
                commands,
                &BuildDescriptor::Compose {
                    file: file.to_string(),
                },
            );
            return Err(DeployError::Run {
                diagnostics: up.combined(),
            });
        }
        self.log.success("Compose stack started");
        Ok(())
    }

    fn diagnostics(
        &self,
        commands: &ContainerCommands<'_>,
        descriptor: &BuildDescriptor,
    ) -> DeployResult<(String, String)> {
        let (status_cmd, logs_cmd) = match descriptor {
            BuildDescriptor::Compose { file } => (
                commands.compose(file).arg("ps"),
                commands
                    .compose(file)
                    .args(["logs".to_string(), "--tail".to_string(), LOG_TAIL_LINES.to_string()]),
            ),
            BuildDescriptor::Dockerfile => (commands.status(), commands.logs()),
        };

        let status = run_remote(self.shell, &status_cmd, None)?.combined();
        let logs = run_remote(self.shell, &logs_cmd, None)?.combined();
        self.log.info(&format!("Container status:\n{}", status));
        self.log.info(&format!("Last {} log lines:\n{}", LOG_TAIL_LINES, logs));
        Ok((status, logs))
    }

    /// Best effort: show what the container said before giving up
    fn log_failure_context(&self, commands: &ContainerCommands<'_>, descriptor: &BuildDescriptor) {
        if let Err(err) = self.diagnostics(commands, descriptor) {
            self.log.warning(&format!("Could not collect diagnostics: {}", err));
        }
    }
}
