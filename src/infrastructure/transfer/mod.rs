//! Build Context Transfer
//!
//! rsync is preferred; scp is the fallback when rsync is not installed.

mod rsync;
mod scp;

pub use rsync::RsyncTransfer;
pub use scp::ScpTransfer;

use crate::domain::entities::RemoteSession;
use crate::domain::ports::FileTransfer;

use super::ssh::SshOptions;

/// Detect and return the best available transfer strategy
pub fn detect_strategy(
    session: &RemoteSession,
    options: &SshOptions,
) -> Option<Box<dyn FileTransfer>> {
    if RsyncTransfer::check_available() {
        return Some(Box::new(RsyncTransfer::new(session.clone(), options.clone())));
    }

    if ScpTransfer::check_available() {
        return Some(Box::new(ScpTransfer::new(session.clone(), options.clone())));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{RemoteHost, SshUser};

    #[test]
    fn detect_strategy_does_not_panic() {
        let session = RemoteSession::new(
            SshUser::parse("deploy").unwrap(),
            RemoteHost::parse("example.test").unwrap(),
            "/tmp/key",
        );
        // Result depends on the machine running the tests
        let _ = detect_strategy(&session, &SshOptions::default());
    }
}
