//! Deploy Log Port
//!
//! Operator-facing, leveled log of a run. Every line that reaches the
//! terminal or the run log file goes through this trait.

use std::fmt;

use crate::domain::value_objects::AccessToken;

/// Level of an operator log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for operator log lines
///
/// Implementations:
/// - FileLog: timestamped run log file
/// - ConsoleLog (binary): colored terminal output
/// - TeeLog / RedactingLog: composition
pub trait DeployLog {
    fn log(&self, level: LogLevel, message: &str);

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn success(&self, message: &str) {
        self.log(LogLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

impl<L: DeployLog + ?Sized> DeployLog for Box<L> {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }
}

impl<L: DeployLog + ?Sized> DeployLog for &L {
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }
}

/// Receives secrets that must never reach a log sink
///
/// The token is only known once input has been collected, after the sinks
/// already exist, so registration happens through this port.
pub trait SecretRegistry {
    fn register(&self, token: &AccessToken);
}

/// Silent sink
pub struct NoopLog;

impl DeployLog for NoopLog {
    fn log(&self, _level: LogLevel, _message: &str) {}
}
