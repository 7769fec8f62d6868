//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod deploy_log;
pub mod file_transfer;
pub mod prompter;
pub mod remote_shell;
pub mod source_control;

pub use deploy_log::{DeployLog, LogLevel, NoopLog, SecretRegistry};
pub use file_transfer::{FileTransfer, TransferError};
pub use prompter::Prompter;
pub use remote_shell::{CommandOutput, RemoteConnector, RemoteShell, ShellError};
pub use source_control::{GitError, SourceControl};
