use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{RemoteHost, SshUser};

/// Identity of the SSH channel: who, where, and with which key.
///
/// Stateless; every remote operation opens its own authenticated connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSession {
    user: SshUser,
    host: RemoteHost,
    key_path: PathBuf,
}

impl RemoteSession {
    pub fn new(user: SshUser, host: RemoteHost, key_path: impl Into<PathBuf>) -> Self {
        Self {
            user,
            host,
            key_path: key_path.into(),
        }
    }

    pub fn user(&self) -> &SshUser {
        &self.user
    }

    pub fn host(&self) -> &RemoteHost {
        &self.host
    }

    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    /// `user@host`, as understood by ssh, scp and rsync
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

impl fmt::Display for RemoteSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.destination())
    }
}
