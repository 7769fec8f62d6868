//! Deployment Validation
//!
//! Two layers: the container must be running, and nginx on the host must
//! answer on port 80 with a 2xx or 3xx status.

use crate::domain::entities::{BuildDescriptor, DeploymentConfig, PUBLIC_PORT};
use crate::domain::ports::{DeployLog, RemoteShell};
use crate::domain::value_objects::RemoteCommand;
use crate::error::{DeployError, DeployResult, HealthLayer};

use super::container::ContainerCommands;
use super::run_remote;

/// Seconds curl may spend on the proxy probe
pub const PROBE_TIMEOUT_SECS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub container_state: String,
    pub http_status: u16,
}

/// Whether a proxy probe status counts as serving
pub fn is_serving(status: u16) -> bool {
    (200..400).contains(&status)
}

pub fn proxy_probe() -> RemoteCommand {
    RemoteCommand::new("curl").args([
        "-s".to_string(),
        "-o".to_string(),
        "/dev/null".to_string(),
        "-w".to_string(),
        "%{http_code}".to_string(),
        "--max-time".to_string(),
        PROBE_TIMEOUT_SECS.to_string(),
        format!("http://127.0.0.1:{}/", PUBLIC_PORT),
    ])
}

pub struct DeploymentValidator<'a> {
    shell: &'a dyn RemoteShell,
    log: &'a dyn DeployLog,
}

impl<'a> DeploymentValidator<'a> {
    pub fn new(shell: &'a dyn RemoteShell, log: &'a dyn DeployLog) -> Self {
        Self { shell, log }
    }

    pub fn validate(
        &self,
        config: &DeploymentConfig,
        descriptor: &BuildDescriptor,
    ) -> DeployResult<ValidationReport> {
        let container_state = self.check_container(config, descriptor)?;
        self.log.success(&format!("Container check passed ({})", container_state));

        let http_status = self.check_proxy()?;
        self.log
            .success(&format!("Proxy check passed (HTTP {})", http_status));

        Ok(ValidationReport {
            container_state,
            http_status,
        })
    }

    fn check_container(
        &self,
        config: &DeploymentConfig,
        descriptor: &BuildDescriptor,
    ) -> DeployResult<String> {
        let commands = ContainerCommands::new(config.project_name(), config.remote_dir());
        match descriptor {
            BuildDescriptor::Dockerfile => {
                let inspect = RemoteCommand::new("docker").args([
                    "inspect",
                    "-f",
                    "{{.State.Status}}",
                    config.project_name(),
                ]);
                let output = run_remote(self.shell, &inspect, None)?;
                let state = output.stdout.trim();
                if output.success() && state == "running" {
                    Ok(state.to_string())
                } else {
                    Err(DeployError::Validation {
                        layer: HealthLayer::Container,
                        detail: format!(
                            "container {} is not running ({})",
                            config.project_name(),
                            if output.success() && !state.is_empty() {
                                state.to_string()
                            } else {
                                output.combined()
                            }
                        ),
                    })
                }
            }
            BuildDescriptor::Compose { file } => {
                let output = run_remote(
                    self.shell,
                    &commands
                        .compose(file)
                        .args(["ps", "--services", "--filter", "status=running"]),
                    None,
                )?;
                let running: Vec<&str> = output
                    .stdout
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .collect();
                if output.success() && !running.is_empty() {
                    Ok(format!("running: {}", running.join(", ")))
                } else {
                    Err(DeployError::Validation {
                        layer: HealthLayer::Container,
                        detail: format!("no compose service is running ({})", output.combined()),
                    })
                }
            }
        }
    }

    fn check_proxy(&self) -> DeployResult<u16> {
        let output = run_remote(self.shell, &proxy_probe(), None)?;
        let status: u16 = output.stdout.trim().parse().unwrap_or(0);
        if output.success() && is_serving(status) {
            return Ok(status);
        }
        let detail = if status == 0 {
            format!("no HTTP response on port {}: {}", PUBLIC_PORT, output.combined())
        } else {
            format!("port {} answered HTTP {}", PUBLIC_PORT, status)
        };
        Err(DeployError::Validation {
            layer: HealthLayer::Proxy,
            detail,
        })
    }
}
