//! Remote Shell Port
//!
//! Everything that happens on the deployment host goes through this trait.
//! Each call is an independent, non-interactive, authenticated round trip;
//! ordering between calls is whatever order the caller issues them in.

use thiserror::Error;

use crate::domain::entities::RemoteSession;
use crate::domain::ports::{FileTransfer, TransferError};
use crate::domain::value_objects::RemoteCommand;

/// Captured result of one remote command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status; `None` when the process was killed by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// stdout followed by stderr, trimmed, for diagnostics
    pub fn combined(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        match (stdout.is_empty(), stderr.is_empty()) {
            (true, true) => match self.status {
                Some(code) => format!("exit status {}", code),
                None => "terminated by signal".to_string(),
            },
            (false, true) => stdout.to_string(),
            (true, false) => stderr.to_string(),
            (false, false) => format!("{}\n{}", stdout, stderr),
        }
    }
}

/// The remote command could not even be launched
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("failed to launch ssh: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Non-interactive command execution on the deployment host
pub trait RemoteShell {
    /// `user@host` this shell talks to (for messages)
    fn destination(&self) -> String;

    /// Run a command, optionally feeding `input` on stdin, and capture everything
    fn run(&self, command: &RemoteCommand, input: Option<&str>) -> Result<CommandOutput, ShellError>;

    /// Pass/fail variant for control flow
    fn succeeds(&self, command: &RemoteCommand) -> Result<bool, ShellError> {
        Ok(self.run(command, None)?.success())
    }

    /// Captured-output variant for decisions
    fn capture(&self, command: &RemoteCommand) -> Result<CommandOutput, ShellError> {
        self.run(command, None)
    }
}

/// Opens shells and transfer channels for a session.
///
/// The orchestrator only learns the session after input is collected, so
/// it receives this factory instead of ready-made channels.
pub trait RemoteConnector {
    fn shell(&self, session: &RemoteSession) -> Box<dyn RemoteShell>;

    fn transfer(&self, session: &RemoteSession) -> Result<Box<dyn FileTransfer>, TransferError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_prefers_both_streams() {
        let out = CommandOutput {
            status: Some(1),
            stdout: "step 1/4\n".to_string(),
            stderr: "no space left on device\n".to_string(),
        };
        assert_eq!(out.combined(), "step 1/4\nno space left on device");
        assert!(!out.success());
    }

    #[test]
    fn combined_falls_back_to_status() {
        assert_eq!(CommandOutput::failed(255, "").combined(), "exit status 255");
    }
}
