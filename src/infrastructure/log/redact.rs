//! Secret scrubbing for log output.

use std::sync::{Arc, Mutex};

use url::Url;

use crate::domain::ports::{DeployLog, LogLevel, SecretRegistry};
use crate::domain::value_objects::AccessToken;

const MASK: &str = "********";

/// Shared set of secrets to scrub.
///
/// Cloning shares the set, so a secret registered after the log sinks are
/// built (the token is only known once input is collected) still applies.
#[derive(Clone, Default)]
pub struct Redactor {
    secrets: Arc<Mutex<Vec<String>>>,
}

impl Redactor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the token, plus the percent-encoded form it takes inside a URL
    pub fn add_token(&self, token: &AccessToken) {
        self.add_secret(token.expose());
    }

    pub fn add_secret(&self, secret: &str) {
        if secret.is_empty() {
            return;
        }
        let mut secrets = self.secrets.lock().unwrap_or_else(|e| e.into_inner());
        for form in [Some(secret.to_string()), url_encoded(secret)]
            .into_iter()
            .flatten()
        {
            if !secrets.contains(&form) {
                secrets.push(form);
            }
        }
        // longest first so a secret containing another is masked whole
        secrets.sort_by_key(|s| std::cmp::Reverse(s.len()));
    }

    pub fn scrub(&self, text: &str) -> String {
        let secrets = self.secrets.lock().unwrap_or_else(|e| e.into_inner());
        secrets
            .iter()
            .fold(text.to_string(), |acc, secret| acc.replace(secret.as_str(), MASK))
    }
}

fn url_encoded(secret: &str) -> Option<String> {
    let mut url = Url::parse("https://redact.invalid/").ok()?;
    url.set_password(Some(secret)).ok()?;
    url.password()
        .filter(|encoded| *encoded != secret)
        .map(str::to_string)
}

impl SecretRegistry for Redactor {
    fn register(&self, token: &AccessToken) {
        self.add_token(token);
    }
}

/// Scrubs every message before handing it to the inner sink
pub struct RedactingLog<L> {
    inner: L,
    redactor: Redactor,
}

impl<L: DeployLog> RedactingLog<L> {
    pub fn new(inner: L, redactor: Redactor) -> Self {
        Self { inner, redactor }
    }
}

impl<L: DeployLog> DeployLog for RedactingLog<L> {
    fn log(&self, level: LogLevel, message: &str) {
        self.inner.log(level, &self.redactor.scrub(message));
    }
}
