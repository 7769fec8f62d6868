//! Infrastructure Layer
//!
//! Concrete adapters for the domain ports:
//!
//! - `ssh`: `RemoteShell` / `RemoteConnector` over the `ssh` binary
//! - `transfer`: rsync and scp `FileTransfer` strategies
//! - `git`: `SourceControl` over the `git` binary
//! - `log`: run log file, fan-out and secret scrubbing sinks

pub mod git;
pub mod log;
pub mod ssh;
pub mod transfer;

pub use git::GitCli;
pub use log::{FileLog, Redactor, RedactingLog, TeeLog};
pub use ssh::{SshConnector, SshOptions, SshShell};
pub use transfer::{detect_strategy, RsyncTransfer, ScpTransfer};
