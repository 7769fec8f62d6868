//! Structured remote command.
//!
//! Remote commands are argument vectors, never concatenated strings. Each
//! argument is quoted on its own when the command is rendered for the remote
//! login shell, so operator-supplied values (branch, paths, names) cannot
//! inject shell syntax.

use std::fmt;

/// A program plus arguments to run on the remote host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    program: String,
    args: Vec<String>,
    privileged: bool,
}

impl RemoteCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            privileged: false,
        }
    }

    /// Run through `sudo -n`, which fails instead of prompting for a password
    pub fn sudo(program: impl Into<String>) -> Self {
        Self {
            privileged: true,
            ..Self::new(program)
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    /// Full argument vector, including the `sudo -n` prefix when privileged
    pub fn argv(&self) -> Vec<&str> {
        let mut argv = Vec::with_capacity(self.args.len() + 3);
        if self.privileged {
            argv.push("sudo");
            argv.push("-n");
        }
        argv.push(self.program.as_str());
        argv.extend(self.args.iter().map(String::as_str));
        argv
    }

    /// Render for the remote shell, quoting every argument individually
    pub fn render(&self) -> String {
        self.argv()
            .into_iter()
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Quote a single word for a POSIX shell.
///
/// Words made only of safe characters are left bare for readable logs;
/// everything else is single-quoted with embedded quotes escaped.
pub fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:,@%+".contains(c));
    if safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}
