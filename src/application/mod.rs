//! Application Layer
//!
//! One use case per deployment stage, plus the pipeline that sequences them.
//! Stages talk to the outside world only through domain ports.

pub mod collect;
pub mod connectivity;
pub mod container;
pub mod pipeline;
pub mod provision;
pub mod proxy;
pub mod repo_sync;
pub mod teardown;
pub mod transfer;
pub mod validate;

pub use collect::ConfigCollector;
pub use connectivity::{test_connection, PROBE_MARKER};
pub use container::{ContainerDeployer, ContainerReport};
pub use pipeline::{
    Collaborators, DeploymentSummary, Orchestrator, PipelineOptions, TeardownSummary,
    TransientDir,
};
pub use provision::{EnvironmentProvisioner, ProvisionStep};
pub use proxy::ProxyConfigurator;
pub use repo_sync::RepositorySync;
pub use teardown::{TeardownReport, Teardown};
pub use transfer::ArtifactTransfer;
pub use validate::{DeploymentValidator, ValidationReport};

use crate::domain::ports::{CommandOutput, RemoteShell};
use crate::domain::value_objects::RemoteCommand;
use crate::error::{DeployError, DeployResult};

/// Run a remote command; failing to even launch ssh is a connectivity problem
pub(crate) fn run_remote(
    shell: &dyn RemoteShell,
    command: &RemoteCommand,
    input: Option<&str>,
) -> DeployResult<CommandOutput> {
    shell
        .run(command, input)
        .map_err(|e| DeployError::Connectivity {
            destination: shell.destination(),
            detail: e.to_string(),
        })
}

#[cfg(test)]
pub(crate) mod fakes;
