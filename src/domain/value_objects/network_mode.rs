//! Container networking policy.

use serde::Deserialize;

/// How the single-container path exposes the application port.
///
/// - `Publish` (default): `-p <port>:<port>`; the container keeps its own
///   network namespace and only the configured port is reachable.
/// - `Host`: `--network host`; the container shares the host namespace. Needed
///   by applications that bind many ports or discover the host address, at
///   the cost of isolation. Explicit opt-in only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    #[default]
    Publish,
    Host,
}

impl NetworkMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "publish" | "bridge" | "port" => Some(NetworkMode::Publish),
            "host" => Some(NetworkMode::Host),
            _ => None,
        }
    }
}
