//! Error types for Hoist
//!
//! Uses `thiserror` for library errors. Every pipeline failure is a
//! [`StageFailure`]: the stage that failed plus the [`DeployError`] cause.
//! The binary decodes it exactly once into a process exit status.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::DeploymentStage;

/// Result type alias for stage-level operations
pub type DeployResult<T> = Result<T, DeployError>;

/// Exit status used when the operator interrupts a run (128 + SIGINT)
pub const EXIT_INTERRUPTED: i32 = 130;

/// Dependency group installed by the provisioner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    PackageIndex,
    ContainerRuntime,
    ComposeTool,
    ReverseProxy,
    HttpClient,
    RuntimePermission,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dependency::PackageIndex => "package index refresh",
            Dependency::ContainerRuntime => "container runtime (docker)",
            Dependency::ComposeTool => "compose tool (docker-compose)",
            Dependency::ReverseProxy => "reverse proxy (nginx)",
            Dependency::HttpClient => "http client (curl)",
            Dependency::RuntimePermission => "docker group membership",
        };
        f.write_str(name)
    }
}

/// Step of the reverse-proxy activation sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyStep {
    Write,
    Enable,
    Validate,
    Reload,
}

impl fmt::Display for ProxyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProxyStep::Write => "write site definition",
            ProxyStep::Enable => "enable site",
            ProxyStep::Validate => "configuration self-check",
            ProxyStep::Reload => "reload",
        };
        f.write_str(name)
    }
}

/// Layer blamed by a failed health check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthLayer {
    Container,
    Proxy,
}

impl fmt::Display for HealthLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthLayer::Container => f.write_str("container health"),
            HealthLayer::Proxy => f.write_str("proxy reachability"),
        }
    }
}

/// Cause of a failed stage
#[derive(Error, Debug)]
pub enum DeployError {
    /// Operator input was rejected and could not be re-prompted
    #[error("invalid {field}: {reason}")]
    InputValidation { field: &'static str, reason: String },

    /// Git refused the repository URL or the access token
    #[error("git {operation} failed (check the repository URL and access token): {detail}")]
    CredentialOrAuth {
        operation: &'static str,
        detail: String,
    },

    /// The requested branch does not exist on the remote
    #[error("branch '{branch}' not found in repository: {detail}")]
    BranchNotFound { branch: String, detail: String },

    /// Nothing in the working copy root describes how to build a container
    #[error("no Dockerfile or compose file found in {}", dir.display())]
    MissingBuildDescriptor { dir: PathBuf },

    /// SSH could not reach or authenticate against the host
    #[error("cannot reach {destination} over SSH: {detail}")]
    Connectivity { destination: String, detail: String },

    /// A package install, enable, or permission step failed
    #[error("provisioning {dependency} failed: {detail}")]
    Provisioning {
        dependency: Dependency,
        detail: String,
    },

    /// Remote directory preparation or file copy failed
    #[error("file transfer failed: {0}")]
    Transfer(String),

    /// Image build failed on the remote host
    #[error("image build failed:\n{diagnostics}")]
    Build { diagnostics: String },

    /// Container or stack failed to start
    #[error("container start failed:\n{diagnostics}")]
    Run { diagnostics: String },

    /// nginx site could not be written, enabled, validated or reloaded
    #[error("reverse proxy {step} failed: {detail}")]
    ProxyConfig { step: ProxyStep, detail: String },

    /// Post-deploy health check failed
    #[error("{layer} check failed: {detail}")]
    Validation { layer: HealthLayer, detail: String },

    /// Remote teardown step failed
    #[error("teardown failed: {0}")]
    Teardown(String),

    /// Operator declined to proceed
    #[error("cancelled by user")]
    UserCancelled,

    /// Operator pressed Ctrl-C
    #[error("interrupted")]
    Interrupted,

    /// Local IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// Whether this cause represents a clean, operator-chosen exit
    pub fn is_cancellation(&self) -> bool {
        matches!(self, DeployError::UserCancelled)
    }
}

/// A failed stage: which stage, and why
#[derive(Error, Debug)]
#[error("{stage} failed: {cause}")]
pub struct StageFailure {
    pub stage: DeploymentStage,
    #[source]
    pub cause: DeployError,
}

impl StageFailure {
    pub fn new(stage: DeploymentStage, cause: DeployError) -> Self {
        Self { stage, cause }
    }

    /// Process exit status for this failure
    ///
    /// Cancellation exits 0, an interrupt exits 130, everything else exits
    /// with the stage's numeric identity.
    pub fn exit_code(&self) -> i32 {
        match self.cause {
            DeployError::UserCancelled => 0,
            DeployError::Interrupted => EXIT_INTERRUPTED,
            _ => i32::from(self.stage.code()),
        }
    }
}
