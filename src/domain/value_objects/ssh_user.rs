use std::fmt;

use super::InvalidInput;

/// Remote login name (POSIX portable user name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SshUser(String);

impl SshUser {
    pub fn parse(input: &str) -> Result<Self, InvalidInput> {
        let user = input.trim();
        if user.is_empty() {
            return Err(InvalidInput::new("ssh user", "must not be empty"));
        }
        if user.len() > 32 {
            return Err(InvalidInput::new("ssh user", "must be at most 32 characters"));
        }
        let mut chars = user.chars();
        let first_ok = chars
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_')
            .unwrap_or(false);
        let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');
        if !first_ok || !rest_ok {
            return Err(InvalidInput::new(
                "ssh user",
                format!("'{}' is not a valid user name", user),
            ));
        }
        Ok(Self(user.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SshUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
