//! Access token value object.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use super::InvalidInput;

/// Repository access credential.
///
/// Held as a `SecretString`; `Debug` never shows the value and nothing in the
/// crate implements `Display` for it. Only the git adapter and the log
/// redactor read the raw value.
pub struct AccessToken {
    inner: SecretString,
}

impl AccessToken {
    pub fn parse(value: impl Into<String>) -> Result<Self, InvalidInput> {
        let value: String = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(InvalidInput::new("access token", "must not be empty"));
        }
        Ok(Self {
            inner: SecretString::from(trimmed.to_string()),
        })
    }

    pub(crate) fn expose(&self) -> &str {
        self.inner.expose_secret()
    }

    /// Masked form for summaries: length only, no characters
    pub fn masked(&self) -> String {
        format!("********  ({} chars)", self.expose().chars().count())
    }
}

impl Clone for AccessToken {
    fn clone(&self) -> Self {
        Self {
            inner: SecretString::from(self.expose().to_string()),
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}
