use std::fmt;
use std::net::Ipv4Addr;

use super::InvalidInput;

/// Address of the deployment host: a dotted IPv4 literal or an RFC 1123 hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteHost(String);

impl RemoteHost {
    pub fn parse(input: &str) -> Result<Self, InvalidInput> {
        let host = input.trim();
        if host.is_empty() {
            return Err(InvalidInput::new("host", "must not be empty"));
        }

        // Anything made of digits and dots must be a real IPv4 literal.
        if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return host
                .parse::<Ipv4Addr>()
                .map(|_| Self(host.to_string()))
                .map_err(|_| {
                    InvalidInput::new("host", format!("'{}' is not a valid IPv4 address", host))
                });
        }

        if is_valid_hostname(host) {
            Ok(Self(host.to_ascii_lowercase()))
        } else {
            Err(InvalidInput::new(
                "host",
                format!("'{}' is not a valid hostname or IPv4 address", host),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_hostname(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > 253 {
        return false;
    }
    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

impl fmt::Display for RemoteHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
