//! Domain Entities
//!
//! - `DeploymentConfig` - everything one run needs, built once and never mutated
//! - `RemoteSession` - (user, host, key) identity of the SSH channel
//! - `ProxyRule` - the single nginx site that fronts the container
//! - `BuildDescriptor` - how the working copy builds its container(s)

mod build_descriptor;
mod deployment_config;
mod proxy_rule;
mod remote_session;

pub use build_descriptor::{BuildDescriptor, COMPOSE_FILE_NAMES, DOCKERFILE_NAME};
pub use deployment_config::{DeploymentConfig, TeardownTarget, REMOTE_ROOT};
pub use proxy_rule::{
    site_available_path, site_enabled_path, ProxyRule, MANAGED_MARKER, PUBLIC_PORT,
};
pub use remote_session::RemoteSession;
