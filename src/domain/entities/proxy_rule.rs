//! Reverse-proxy site definition.
//!
//! The one piece of generated configuration: an nginx server block that
//! forwards public port 80 to the container's port on loopback.

use crate::domain::value_objects::AppPort;

/// Port nginx listens on for public traffic
pub const PUBLIC_PORT: u16 = 80;

const SITES_AVAILABLE: &str = "/etc/nginx/sites-available";
const SITES_ENABLED: &str = "/etc/nginx/sites-enabled";
const DEFAULT_SITE: &str = "default";

/// First line of every generated site; marks it as ours to replace
pub const MANAGED_MARKER: &str = "# Managed by hoist";

/// The nginx site fronting one deployment, keyed by site name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyRule {
    site_name: String,
    upstream_port: AppPort,
}

impl ProxyRule {
    pub fn new(site_name: impl Into<String>, upstream_port: AppPort) -> Self {
        Self {
            site_name: site_name.into(),
            upstream_port,
        }
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    pub fn upstream_port(&self) -> AppPort {
        self.upstream_port
    }

    pub fn available_path(&self) -> String {
        site_available_path(&self.site_name)
    }

    pub fn enabled_path(&self) -> String {
        site_enabled_path(&self.site_name)
    }

    /// Path of the distribution's default site, disabled on activation
    pub fn default_site_path() -> String {
        site_enabled_path(DEFAULT_SITE)
    }

    pub fn enabled_dir() -> &'static str {
        SITES_ENABLED
    }

    /// Render the server block.
    ///
    /// Claims the public port as `default_server`, so it answers every
    /// request on port 80 whatever the Host header. Forwards the original
    /// host, client address and forwarding chain, and passes WebSocket
    /// upgrades through.
    pub fn render(&self) -> String {
        format!(
            r#"{marker}. Overwritten on every deploy.
server {{
    listen {public} default_server;
    listen [::]:{public} default_server;
    server_name _;

    client_max_body_size 50m;

    location / {{
        proxy_pass http://127.0.0.1:{upstream};
        proxy_http_version 1.1;

        proxy_set_header Host $host;
        proxy_set_header X-Real-IP $remote_addr;
        proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;
        proxy_set_header X-Forwarded-Proto $scheme;

        proxy_set_header Upgrade $http_upgrade;
        proxy_set_header Connection "upgrade";
        proxy_cache_bypass $http_upgrade;
        proxy_read_timeout 300s;
    }}
}}
"#,
            marker = MANAGED_MARKER,
            public = PUBLIC_PORT,
            upstream = self.upstream_port,
        )
    }
}

pub fn site_available_path(site_name: &str) -> String {
    format!("{}/{}", SITES_AVAILABLE, site_name)
}

pub fn site_enabled_path(site_name: &str) -> String {
    format!("{}/{}", SITES_ENABLED, site_name)
}
