//! Repository Sync
//!
//! Produces a local working copy of the requested branch. The authenticated
//! remote exists only in memory for the duration of each git call; what is
//! left on disk never contains the token, and `.git` is deleted before the
//! copy leaves the machine.

use std::fs;
use std::path::Path;

use crate::domain::entities::{BuildDescriptor, DeploymentConfig};
use crate::domain::ports::{DeployLog, GitError, SourceControl};
use crate::domain::value_objects::{AuthenticatedRemote, RepoTransport};
use crate::error::{DeployError, DeployResult};

pub struct RepositorySync<'a> {
    git: &'a dyn SourceControl,
    log: &'a dyn DeployLog,
    token_user: &'a str,
}

fn auth_error(err: GitError) -> DeployError {
    DeployError::CredentialOrAuth {
        operation: err.operation,
        detail: err.detail,
    }
}

impl<'a> RepositorySync<'a> {
    pub fn new(git: &'a dyn SourceControl, log: &'a dyn DeployLog, token_user: &'a str) -> Self {
        Self {
            git,
            log,
            token_user,
        }
    }

    pub fn sync(&self, config: &DeploymentConfig, workdir: &Path) -> DeployResult<BuildDescriptor> {
        let repository = config.repository();
        let remote = repository.authenticated(self.token_user, config.token());
        if repository.transport() == RepoTransport::Ssh {
            self.log.warning(
                "SSH repository URL: the access token is not used; git authenticates with your SSH agent",
            );
        }

        if workdir.join(".git").is_dir() {
            self.update(workdir, &remote, config)?;
        } else {
            self.fresh_clone(workdir, &remote, config)?;
        }

        fs::remove_dir_all(workdir.join(".git"))?;

        let names: Vec<String> = fs::read_dir(workdir)?
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        let descriptor = BuildDescriptor::from_file_names(names.iter().map(String::as_str))
            .ok_or_else(|| DeployError::MissingBuildDescriptor {
                dir: workdir.to_path_buf(),
            })?;

        self.log.success(&format!(
            "Repository ready at {} (building from {})",
            workdir.display(),
            descriptor.file_name()
        ));
        Ok(descriptor)
    }

    fn update(
        &self,
        workdir: &Path,
        remote: &AuthenticatedRemote,
        config: &DeploymentConfig,
    ) -> DeployResult<()> {
        self.log.info(&format!(
            "Updating existing checkout in {}",
            workdir.display()
        ));
        self.git
            .set_remote_url(workdir, remote.plain())
            .map_err(auth_error)?;
        self.git.fetch(workdir, remote).map_err(auth_error)?;
        self.checkout(workdir, config)?;
        self.git
            .pull(workdir, remote, config.branch())
            .map_err(auth_error)
    }

    fn fresh_clone(
        &self,
        workdir: &Path,
        remote: &AuthenticatedRemote,
        config: &DeploymentConfig,
    ) -> DeployResult<()> {
        if workdir.exists() {
            fs::remove_dir_all(workdir)?;
        }
        if let Some(parent) = workdir.parent() {
            fs::create_dir_all(parent)?;
        }

        self.log
            .info(&format!("Cloning {}", config.repository()));
        self.git.clone_repo(remote, workdir).map_err(auth_error)?;
        self.checkout(workdir, config)
    }

    fn checkout(&self, workdir: &Path, config: &DeploymentConfig) -> DeployResult<()> {
        self.log
            .info(&format!("Checking out branch {}", config.branch()));
        self.git
            .checkout(workdir, config.branch())
            .map_err(|err| DeployError::BranchNotFound {
                branch: config.branch().to_string(),
                detail: err.detail,
            })
    }
}
