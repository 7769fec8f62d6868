//! Deployment stage identity

use std::fmt;

/// One step of the deployment pipeline.
///
/// The numeric [`code`](DeploymentStage::code) doubles as the process exit
/// status when the stage fails, so callers can tell failure phases apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeploymentStage {
    CollectInput,
    SyncRepo,
    TestConnection,
    ProvisionHost,
    TransferFiles,
    DeployContainer,
    ConfigureProxy,
    Validate,
    /// Alternate entry point, never part of the forward pipeline
    Teardown,
}

impl DeploymentStage {
    /// The forward pipeline, in execution order
    pub const PIPELINE: [DeploymentStage; 8] = [
        DeploymentStage::CollectInput,
        DeploymentStage::SyncRepo,
        DeploymentStage::TestConnection,
        DeploymentStage::ProvisionHost,
        DeploymentStage::TransferFiles,
        DeploymentStage::DeployContainer,
        DeploymentStage::ConfigureProxy,
        DeploymentStage::Validate,
    ];

    pub fn code(self) -> u8 {
        match self {
            DeploymentStage::CollectInput => 1,
            DeploymentStage::SyncRepo => 2,
            DeploymentStage::TestConnection => 3,
            DeploymentStage::ProvisionHost => 4,
            DeploymentStage::TransferFiles => 5,
            DeploymentStage::DeployContainer => 6,
            DeploymentStage::ConfigureProxy => 7,
            DeploymentStage::Validate => 8,
            DeploymentStage::Teardown => 9,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeploymentStage::CollectInput => "collect input",
            DeploymentStage::SyncRepo => "sync repository",
            DeploymentStage::TestConnection => "test connection",
            DeploymentStage::ProvisionHost => "provision host",
            DeploymentStage::TransferFiles => "transfer files",
            DeploymentStage::DeployContainer => "deploy container",
            DeploymentStage::ConfigureProxy => "configure proxy",
            DeploymentStage::Validate => "validate deployment",
            DeploymentStage::Teardown => "teardown",
        }
    }
}

impl fmt::Display for DeploymentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
