//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::value_objects::NetworkMode;

use super::loader::{self, ConfigError, ConfigWarning};

/// Prompt defaults offered to the operator
///
/// There is deliberately no credential field: a credential-like key anywhere
/// in a settings file is rejected by the loader.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct PromptDefaults {
    #[serde(default)]
    pub repository: Option<String>,

    #[serde(default)]
    pub branch: Option<String>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub key_path: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,
}

/// SSH channel tuning
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SshConfig {
    #[serde(default = "default_ssh_port")]
    pub port: u16,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_keepalive_interval")]
    pub keepalive_interval_secs: u64,

    #[serde(default = "default_keepalive_count")]
    pub keepalive_count_max: u32,

    /// Passed through as `StrictHostKeyChecking`
    #[serde(default = "default_host_key_policy")]
    pub strict_host_key_checking: String,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            port: default_ssh_port(),
            connect_timeout_secs: default_connect_timeout(),
            keepalive_interval_secs: default_keepalive_interval(),
            keepalive_count_max: default_keepalive_count(),
            strict_host_key_checking: default_host_key_policy(),
        }
    }
}

fn default_ssh_port() -> u16 {
    22
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_keepalive_interval() -> u64 {
    30
}

fn default_keepalive_count() -> u32 {
    4
}

fn default_host_key_policy() -> String {
    "accept-new".to_string()
}

/// Container stage tuning
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ContainerConfig {
    /// Seconds to wait after start before collecting diagnostics
    #[serde(default = "default_settle_secs")]
    pub settle_secs: u64,

    #[serde(default)]
    pub network: NetworkMode,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            settle_secs: default_settle_secs(),
            network: NetworkMode::default(),
        }
    }
}

fn default_settle_secs() -> u64 {
    5
}

/// Git tuning
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GitConfig {
    /// Username placed in front of the token in the authenticated URL
    #[serde(default = "default_token_user")]
    pub token_user: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            token_user: default_token_user(),
        }
    }
}

fn default_token_user() -> String {
    "x-access-token".to_string()
}

/// Output configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Main settings structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub defaults: PromptDefaults,

    #[serde(default)]
    pub ssh: SshConfig,

    #[serde(default)]
    pub container: ContainerConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (settings, _warnings) = loader::load_with_warnings(path)?;
        Ok(settings)
    }

    /// Load settings and collect non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Resolve settings from an explicit path, project file, user file, or defaults
    pub fn discover(
        explicit: Option<&Path>,
        cwd: &Path,
    ) -> Result<(Self, Vec<ConfigWarning>, Option<PathBuf>), ConfigError> {
        loader::discover(explicit, cwd)
    }

    /// Apply environment variable overrides (HOIST_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }
}
