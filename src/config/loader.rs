//! Settings discovery, loading and environment overrides

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::{ColorMode, Settings};
use crate::domain::value_objects::NetworkMode;

/// Project-local settings file name
pub const PROJECT_FILE: &str = "hoist.toml";

/// Keys that would mean a credential is being stored on disk
const CREDENTIAL_KEYS: &[&str] = &[
    "token",
    "access_token",
    "password",
    "credential",
    "credentials",
    "secret",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error(
        "{}: key '{key}' looks like a credential; the access token is always entered interactively and never stored",
        path.display()
    )]
    CredentialInConfig { path: PathBuf, key: String },
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load settings and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Settings, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_with_warnings(&content, path)
}

/// Parse settings text; `path` is only used for messages
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> Result<(Settings, Vec<ConfigWarning>), ConfigError> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let settings: Settings = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut warnings = Vec::with_capacity(unknown_paths.len());
    for path_str in unknown_paths {
        let key = path_str
            .split('.')
            .next_back()
            .unwrap_or(path_str.as_str())
            .to_string();

        if CREDENTIAL_KEYS.contains(&key.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::CredentialInConfig {
                path: path.to_path_buf(),
                key: path_str,
            });
        }

        warnings.push(ConfigWarning {
            line: find_line_number(content, &key),
            suggestion: suggest_key(&key),
            file: path.to_path_buf(),
            key,
        });
    }

    Ok((settings, warnings))
}

/// Resolve the settings file to use and load it.
///
/// Order: explicit `--config` path (must exist), `./hoist.toml`, the user
/// config file, then built-in defaults. Environment overrides apply last.
pub fn discover(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<(Settings, Vec<ConfigWarning>, Option<PathBuf>), ConfigError> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project = cwd.join(PROJECT_FILE);
            if project.is_file() {
                Some(project)
            } else {
                user_config_path().filter(|p| p.is_file())
            }
        }
    };

    match candidate {
        Some(path) => {
            let (settings, warnings) = load_with_warnings(&path)?;
            tracing::debug!(path = %path.display(), "loaded settings");
            Ok((with_env_overrides(settings), warnings, Some(path)))
        }
        None => Ok((with_env_overrides(Settings::default()), Vec::new(), None)),
    }
}

/// `~/.config/hoist/config.toml` (platform equivalent)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hoist").join("config.toml"))
}

/// Apply environment variable overrides (HOIST_* prefix)
pub fn with_env_overrides(settings: Settings) -> Settings {
    apply_overrides(settings, |name| std::env::var(name).ok())
}

/// Apply overrides from an arbitrary variable lookup
pub fn apply_overrides<F>(mut settings: Settings, lookup: F) -> Settings
where
    F: Fn(&str) -> Option<String>,
{
    let text = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = text("HOIST_REPOSITORY") {
        settings.defaults.repository = Some(v);
    }
    if let Some(v) = text("HOIST_BRANCH") {
        settings.defaults.branch = Some(v);
    }
    if let Some(v) = text("HOIST_HOST") {
        settings.defaults.host = Some(v);
    }
    if let Some(v) = text("HOIST_USER") {
        settings.defaults.user = Some(v);
    }
    if let Some(v) = text("HOIST_KEY_PATH") {
        settings.defaults.key_path = Some(v);
    }
    if let Some(port) = text("HOIST_PORT").and_then(|v| v.trim().parse().ok()) {
        settings.defaults.port = Some(port);
    }
    if let Some(port) = text("HOIST_SSH_PORT").and_then(|v| v.trim().parse().ok()) {
        settings.ssh.port = port;
    }
    if let Some(secs) = text("HOIST_CONNECT_TIMEOUT").and_then(|v| v.trim().parse().ok()) {
        settings.ssh.connect_timeout_secs = secs;
    }
    if let Some(secs) = text("HOIST_SETTLE_SECS").and_then(|v| v.trim().parse().ok()) {
        settings.container.settle_secs = secs;
    }
    if let Some(mode) = text("HOIST_NETWORK").and_then(|v| NetworkMode::parse(&v)) {
        settings.container.network = mode;
    }
    if let Some(color) = text("HOIST_COLOR") {
        settings.output.color = match color.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        };
    }
    // NO_COLOR wins over everything but an explicit flag
    if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        settings.output.color = ColorMode::Never;
    }

    settings
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "defaults",
        "repository",
        "branch",
        "host",
        "user",
        "key_path",
        "port",
        "ssh",
        "connect_timeout_secs",
        "keepalive_interval_secs",
        "keepalive_count_max",
        "strict_host_key_checking",
        "container",
        "settle_secs",
        "network",
        "git",
        "token_user",
        "output",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
