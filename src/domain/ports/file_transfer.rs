//! File Transfer Port
//!
//! Copies a local directory's contents into a remote directory.

use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransferError {
    #[error("no transfer method available: {0}")]
    NotAvailable(String),

    #[error("{0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Strategy for copying the build context to the remote host
pub trait FileTransfer {
    /// Name of this transfer method (for logging)
    fn name(&self) -> &'static str;

    /// Make `remote_dir` hold exactly the contents of `local_dir`
    fn transfer(&self, local_dir: &Path, remote_dir: &str) -> Result<(), TransferError>;
}
