use std::fmt;

use super::InvalidInput;

/// TCP port the application listens on inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppPort(u16);

impl AppPort {
    pub fn new(port: u16) -> Result<Self, InvalidInput> {
        if port == 0 {
            return Err(InvalidInput::new("port", "must be between 1 and 65535"));
        }
        Ok(Self(port))
    }

    pub fn parse(input: &str) -> Result<Self, InvalidInput> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidInput::new(
                "port",
                format!("'{}' is not a number", trimmed),
            ));
        }
        let value: u32 = trimmed
            .parse()
            .map_err(|_| InvalidInput::new("port", "must be between 1 and 65535"))?;
        if !(1..=65535).contains(&value) {
            return Err(InvalidInput::new("port", "must be between 1 and 65535"));
        }
        Self::new(value as u16)
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for AppPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert_eq!(AppPort::parse("1").unwrap().get(), 1);
        assert_eq!(AppPort::parse("65535").unwrap().get(), 65535);
        assert_eq!(AppPort::parse(" 8080 ").unwrap().get(), 8080);
    }

    #[test]
    fn rejects_out_of_range_and_garbage() {
        assert!(AppPort::parse("0").is_err());
        assert!(AppPort::parse("65536").is_err());
        assert!(AppPort::parse("99999999999").is_err());
        assert!(AppPort::parse("-1").is_err());
        assert!(AppPort::parse("80a").is_err());
        assert!(AppPort::parse("").is_err());
    }
}
