//! Deployment configuration entity.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{
    AccessToken, AppPort, BranchName, NetworkMode, RemoteHost, RepoUrl, SshUser,
};

use super::RemoteSession;

/// Parent of every remote install directory
pub const REMOTE_ROOT: &str = "/opt";

/// Everything one deployment run needs.
///
/// Built once by the collector from validated input, then only borrowed.
/// There are no setters.
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    repository: RepoUrl,
    token: AccessToken,
    branch: BranchName,
    session: RemoteSession,
    port: AppPort,
    network: NetworkMode,
    remote_dir: String,
}

impl DeploymentConfig {
    pub fn new(
        repository: RepoUrl,
        token: AccessToken,
        branch: Option<BranchName>,
        session: RemoteSession,
        port: AppPort,
        network: NetworkMode,
    ) -> Self {
        let remote_dir = remote_dir_for(repository.project_name());
        Self {
            repository,
            token,
            branch: branch.unwrap_or_default(),
            session,
            port,
            network,
            remote_dir,
        }
    }

    pub fn repository(&self) -> &RepoUrl {
        &self.repository
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    pub fn session(&self) -> &RemoteSession {
        &self.session
    }

    pub fn host(&self) -> &RemoteHost {
        self.session.host()
    }

    pub fn user(&self) -> &SshUser {
        self.session.user()
    }

    pub fn key_path(&self) -> &Path {
        self.session.key_path()
    }

    pub fn port(&self) -> AppPort {
        self.port
    }

    pub fn network(&self) -> NetworkMode {
        self.network
    }

    /// Container, image, compose project and nginx site name
    pub fn project_name(&self) -> &str {
        self.repository.project_name()
    }

    pub fn remote_dir(&self) -> &str {
        &self.remote_dir
    }

    /// Identity needed to tear this deployment down again
    pub fn teardown_target(&self) -> TeardownTarget {
        TeardownTarget::new(&self.repository, self.session.clone())
    }
}

/// Identifying configuration for the teardown path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownTarget {
    project_name: String,
    remote_dir: String,
    session: RemoteSession,
}

impl TeardownTarget {
    pub fn new(repository: &RepoUrl, session: RemoteSession) -> Self {
        Self {
            project_name: repository.project_name().to_string(),
            remote_dir: remote_dir_for(repository.project_name()),
            session,
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn remote_dir(&self) -> &str {
        &self.remote_dir
    }

    pub fn session(&self) -> &RemoteSession {
        &self.session
    }
}

fn remote_dir_for(project_name: &str) -> String {
    PathBuf::from(REMOTE_ROOT)
        .join(project_name)
        .to_string_lossy()
        .into_owned()
}
