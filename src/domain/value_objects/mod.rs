//! Domain Value Objects
//!
//! Immutable, validated types. Each `parse` rejects bad operator input with an
//! [`InvalidInput`] describing what was wrong, before any network traffic.

mod access_token;
mod app_port;
mod branch;
mod network_mode;
mod remote_command;
mod remote_host;
mod repo_url;
mod ssh_user;
mod stage;

pub use access_token::AccessToken;
pub use app_port::AppPort;
pub use branch::BranchName;
pub use network_mode::NetworkMode;
pub use remote_command::{shell_quote, RemoteCommand};
pub use remote_host::RemoteHost;
pub use repo_url::{AuthenticatedRemote, RepoTransport, RepoUrl};
pub use ssh_user::SshUser;
pub use stage::DeploymentStage;

use thiserror::Error;

/// Rejected operator input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct InvalidInput {
    pub field: &'static str,
    pub reason: String,
}

impl InvalidInput {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
