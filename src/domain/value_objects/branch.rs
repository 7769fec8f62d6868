use std::fmt;

use super::InvalidInput;

/// Git branch to deploy.
///
/// Follows the `git check-ref-format` rules that matter here and additionally
/// refuses a leading `-`, so the name can never be read as a git option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName(String);

impl BranchName {
    pub const DEFAULT: &'static str = "main";

    /// Parse operator input; empty input selects the default branch
    pub fn parse(input: &str) -> Result<Self, InvalidInput> {
        let name = input.trim();
        if name.is_empty() {
            return Ok(Self::default());
        }

        let invalid = |reason: &str| Err(InvalidInput::new("branch", reason.to_string()));

        if name.starts_with('-') {
            return invalid("must not start with '-'");
        }
        if name.starts_with('/') || name.ends_with('/') || name.contains("//") {
            return invalid("must not start or end with '/' or contain '//'");
        }
        if name.contains("..") || name.contains("@{") || name == "@" {
            return invalid("must not contain '..' or '@{'");
        }
        if name.ends_with(".lock") || name.ends_with('.') {
            return invalid("must not end with '.lock' or '.'");
        }
        if name
            .chars()
            .any(|c| c.is_control() || c.is_whitespace() || "~^:?*[\\".contains(c))
        {
            return invalid("contains a character git does not allow in branch names");
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BranchName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
