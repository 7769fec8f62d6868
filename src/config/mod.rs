//! Settings for Hoist
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (HOIST_*)
//! 3. `--config <PATH>`, else `./hoist.toml`, else `~/.config/hoist/config.toml`
//! 4. Built-in defaults (lowest priority)
//!
//! Settings only ever hold prompt defaults and tuning. The access token is
//! not a setting.

mod loader;
mod types;

pub use loader::{
    apply_overrides, parse_with_warnings, user_config_path, ConfigError, ConfigWarning,
    PROJECT_FILE,
};
pub use types::{
    ColorMode, ContainerConfig, GitConfig, OutputConfig, PromptDefaults, Settings, SshConfig,
};
