//! Pipeline Options
//!
//! What the orchestrator talks to, and the knobs it runs with.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{PromptDefaults, Settings};
use crate::domain::ports::{DeployLog, Prompter, RemoteConnector, SecretRegistry, SourceControl};
use crate::domain::value_objects::NetworkMode;

use super::workspace::WORK_DIR_NAME;

/// Ports the pipeline drives
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub prompter: &'a dyn Prompter,
    pub git: &'a dyn SourceControl,
    pub connector: &'a dyn RemoteConnector,
    pub log: &'a dyn DeployLog,
    /// Told about the access token as soon as it is known
    pub secrets: &'a dyn SecretRegistry,
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Parent of the per-project working copies
    pub work_root: PathBuf,
    /// Wait between container start and diagnostics
    pub settle: Duration,
    /// Username paired with the access token in HTTPS remotes
    pub token_user: String,
    pub network: NetworkMode,
    pub defaults: PromptDefaults,
    /// Where `~/` in key paths points
    pub home: Option<PathBuf>,
    /// Run log, reported back in the summary
    pub log_file: Option<PathBuf>,
}

impl PipelineOptions {
    pub fn from_settings(settings: &Settings, invocation_dir: &Path) -> Self {
        Self {
            work_root: invocation_dir.join(WORK_DIR_NAME),
            settle: Duration::from_secs(settings.container.settle_secs),
            token_user: settings.git.token_user.clone(),
            network: settings.container.network,
            defaults: settings.defaults.clone(),
            home: dirs::home_dir(),
            log_file: None,
        }
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }
}
