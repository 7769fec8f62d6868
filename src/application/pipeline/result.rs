//! Pipeline Results

use std::path::PathBuf;

use crate::application::teardown::TeardownReport;
use crate::domain::entities::BuildDescriptor;
use crate::domain::value_objects::AppPort;

/// What a successful deployment produced
#[derive(Debug, Clone)]
pub struct DeploymentSummary {
    pub project_name: String,
    /// Where the application is now served, through nginx on port 80
    pub public_url: String,
    pub internal_port: AppPort,
    pub branch: String,
    pub remote_dir: String,
    pub descriptor: BuildDescriptor,
    pub transfer_method: &'static str,
    pub container_state: String,
    pub http_status: u16,
    pub log_file: Option<PathBuf>,
}

impl DeploymentSummary {
    pub fn is_compose(&self) -> bool {
        matches!(self.descriptor, BuildDescriptor::Compose { .. })
    }
}

#[derive(Debug, Clone)]
pub struct TeardownSummary {
    pub project_name: String,
    pub destination: String,
    pub remote_dir: String,
    pub report: TeardownReport,
    pub log_file: Option<PathBuf>,
}

impl TeardownSummary {
    /// Whether anything was actually found to remove
    pub fn removed_anything(&self) -> bool {
        let r = &self.report;
        r.removed_stack || r.removed_container || r.removed_image
    }
}
