//! Repository URL value object.
//!
//! Accepts the git remote shapes operators actually paste:
//! - `https://host/org/app.git` (or `http://`)
//! - `ssh://[user@]host[:port]/org/app.git`
//! - `user@host:org/app.git` (scp-like)

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{AccessToken, InvalidInput};

/// Transport implied by the URL shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoTransport {
    Https,
    Ssh,
}

/// A validated git remote plus the project name derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrl {
    raw: String,
    transport: RepoTransport,
    project_name: String,
}

fn scp_like() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9.-]+:([^\s]+)$").expect("static regex")
    })
}

impl RepoUrl {
    pub fn parse(input: &str) -> Result<Self, InvalidInput> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(InvalidInput::new("repository URL", "must not be empty"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(InvalidInput::new(
                "repository URL",
                "must not contain whitespace",
            ));
        }

        let lower = raw.to_ascii_lowercase();
        let (transport, path) = if lower.starts_with("https://")
            || lower.starts_with("http://")
            || lower.starts_with("ssh://")
        {
            let url = Url::parse(raw)
                .map_err(|e| InvalidInput::new("repository URL", e.to_string()))?;
            if url.host_str().map(str::is_empty).unwrap_or(true) {
                return Err(InvalidInput::new("repository URL", "has no host"));
            }
            let transport = if url.scheme() == "ssh" {
                RepoTransport::Ssh
            } else {
                if !url.username().is_empty() || url.password().is_some() {
                    return Err(InvalidInput::new(
                        "repository URL",
                        "must not embed credentials; the access token is asked for separately",
                    ));
                }
                RepoTransport::Https
            };
            (transport, url.path().to_string())
        } else if let Some(caps) = scp_like().captures(raw) {
            (RepoTransport::Ssh, caps[1].to_string())
        } else {
            return Err(InvalidInput::new(
                "repository URL",
                "must be an http(s):// or ssh git remote, e.g. https://github.com/org/app.git or git@github.com:org/app.git",
            ));
        };

        let project_name = derive_project_name(&path).ok_or_else(|| {
            InvalidInput::new("repository URL", "does not end in a repository name")
        })?;

        Ok(Self {
            raw: raw.to_string(),
            transport,
            project_name,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn transport(&self) -> RepoTransport {
        self.transport
    }

    /// Project name: final path segment, `.git` stripped, made safe for
    /// container and image names (lowercase `[a-z0-9_.-]`)
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Build the transient authenticated form of this URL.
    ///
    /// Only HTTP(S) remotes carry the token; SSH remotes authenticate with
    /// the local SSH agent and get no authenticated form.
    pub fn authenticated(&self, token_user: &str, token: &AccessToken) -> AuthenticatedRemote {
        let authenticated = match self.transport {
            RepoTransport::Https => Url::parse(&self.raw).ok().and_then(|mut url| {
                url.set_username(token_user).ok()?;
                url.set_password(Some(token.expose())).ok()?;
                Some(SecretString::from(url.to_string()))
            }),
            RepoTransport::Ssh => None,
        };
        AuthenticatedRemote {
            plain: self.raw.clone(),
            authenticated,
        }
    }
}

fn derive_project_name(path: &str) -> Option<String> {
    let last = path
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or("");
    let stem = last.strip_suffix(".git").unwrap_or(last);

    let sanitized: String = stem
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let sanitized = sanitized.trim_start_matches(|c: char| !c.is_ascii_alphanumeric());

    if sanitized.is_empty() {
        None
    } else {
        Some(sanitized.to_string())
    }
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A remote URL paired with its transient authenticated form.
///
/// The authenticated form lives only in memory for the duration of one git
/// operation and is never displayed.
pub struct AuthenticatedRemote {
    plain: String,
    authenticated: Option<SecretString>,
}

impl AuthenticatedRemote {
    /// Remote without credentials
    pub fn unauthenticated(plain: impl Into<String>) -> Self {
        Self {
            plain: plain.into(),
            authenticated: None,
        }
    }

    /// URL safe to show, store, and pass on a command line
    pub fn plain(&self) -> &str {
        &self.plain
    }

    pub fn has_credentials(&self) -> bool {
        self.authenticated.is_some()
    }

    pub(crate) fn authenticated_url(&self) -> Option<&str> {
        self.authenticated.as_ref().map(|s| s.expose_secret())
    }
}

impl fmt::Debug for AuthenticatedRemote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedRemote")
            .field("plain", &self.plain)
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}
