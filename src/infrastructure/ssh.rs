//! SSH Remote Shell
//!
//! Implements the RemoteShell port by spawning one `ssh` process per command.
//! Every invocation is non-interactive: batch mode, key-only auth, bounded
//! connect time and keep-alive probes.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use crate::config::SshConfig;
use crate::domain::entities::RemoteSession;
use crate::domain::ports::{
    CommandOutput, FileTransfer, RemoteConnector, RemoteShell, ShellError, TransferError,
};
use crate::domain::value_objects::{shell_quote, RemoteCommand};

use super::transfer::detect_strategy;

/// Connection options shared by ssh, rsync and scp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshOptions {
    pub port: u16,
    pub connect_timeout_secs: u64,
    pub keepalive_interval_secs: u64,
    pub keepalive_count_max: u32,
    pub strict_host_key_checking: String,
}

impl Default for SshOptions {
    fn default() -> Self {
        Self::from(&SshConfig::default())
    }
}

impl From<&SshConfig> for SshOptions {
    fn from(config: &SshConfig) -> Self {
        Self {
            port: config.port,
            connect_timeout_secs: config.connect_timeout_secs,
            keepalive_interval_secs: config.keepalive_interval_secs,
            keepalive_count_max: config.keepalive_count_max,
            strict_host_key_checking: config.strict_host_key_checking.clone(),
        }
    }
}

impl SshOptions {
    /// Option arguments for an ssh-family client.
    ///
    /// `port_flag` is `-p` for ssh and `-P` for scp.
    pub fn client_args(&self, session: &RemoteSession, port_flag: &str) -> Vec<String> {
        vec![
            "-i".to_string(),
            session.key_path().to_string_lossy().into_owned(),
            port_flag.to_string(),
            self.port.to_string(),
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            "IdentitiesOnly=yes".to_string(),
            "-o".to_string(),
            format!("ConnectTimeout={}", self.connect_timeout_secs),
            "-o".to_string(),
            format!("ServerAliveInterval={}", self.keepalive_interval_secs),
            "-o".to_string(),
            format!("ServerAliveCountMax={}", self.keepalive_count_max),
            "-o".to_string(),
            format!("StrictHostKeyChecking={}", self.strict_host_key_checking),
        ]
    }

    /// Full `ssh ...` invocation as one string, for `rsync -e`
    pub fn remote_shell_spec(&self, session: &RemoteSession) -> String {
        std::iter::once("ssh".to_string())
            .chain(
                self.client_args(session, "-p")
                    .iter()
                    .map(|arg| shell_quote(arg)),
            )
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One SSH channel identity; stateless between calls
pub struct SshShell {
    session: RemoteSession,
    options: SshOptions,
}

impl SshShell {
    pub fn new(session: RemoteSession, options: SshOptions) -> Self {
        Self { session, options }
    }

    fn command(&self, remote: &RemoteCommand) -> Command {
        let mut cmd = Command::new("ssh");
        cmd.args(self.options.client_args(&self.session, "-p"))
            .arg(self.session.destination())
            .arg(remote.render());
        cmd
    }
}

impl RemoteShell for SshShell {
    fn destination(&self) -> String {
        self.session.destination()
    }

    fn run(&self, command: &RemoteCommand, input: Option<&str>) -> Result<CommandOutput, ShellError> {
        tracing::debug!(
            destination = %self.session.destination(),
            command = %command,
            stdin = input.is_some(),
            "ssh"
        );

        let mut child = self
            .command(command)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let (Some(inp), Some(stdin)) = (input, child.stdin.take()) {
            feed_stdin(stdin, inp)?;
        }

        let output = child.wait_with_output()?;
        let result = CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        tracing::debug!(status = ?result.status, "ssh finished");
        Ok(result)
    }
}

/// Write `input` to the child and close its stdin.
///
/// A remote command that exits before reading everything closes the pipe.
/// That is not a transport failure: the exit status from `wait_with_output`
/// says what happened.
fn feed_stdin(mut stdin: impl Write, input: &str) -> io::Result<()> {
    match stdin.write_all(input.as_bytes()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("remote command closed stdin early");
            Ok(())
        }
        other => other,
    }
}

/// Opens [`SshShell`]s and picks a transfer method
#[derive(Debug, Clone, Default)]
pub struct SshConnector {
    options: SshOptions,
}

impl SshConnector {
    pub fn new(options: SshOptions) -> Self {
        Self { options }
    }
}

impl RemoteConnector for SshConnector {
    fn shell(&self, session: &RemoteSession) -> Box<dyn RemoteShell> {
        Box::new(SshShell::new(session.clone(), self.options.clone()))
    }

    fn transfer(&self, session: &RemoteSession) -> Result<Box<dyn FileTransfer>, TransferError> {
        detect_strategy(session, &self.options).ok_or_else(|| {
            TransferError::NotAvailable("neither rsync nor scp is installed locally".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{RemoteHost, SshUser};

    fn session() -> RemoteSession {
        RemoteSession::new(
            SshUser::parse("deploy").unwrap(),
            RemoteHost::parse("10.0.0.5").unwrap(),
            "/home/me/.ssh/id_ed25519",
        )
    }

    #[test]
    fn client_args_are_non_interactive() {
        let args = SshOptions::default().client_args(&session(), "-p");
        let joined = args.join(" ");

        assert!(joined.contains("-i /home/me/.ssh/id_ed25519"));
        assert!(joined.contains("-p 22"));
        assert!(joined.contains("BatchMode=yes"));
        assert!(joined.contains("IdentitiesOnly=yes"));
        assert!(joined.contains("ConnectTimeout=10"));
        assert!(joined.contains("ServerAliveInterval=30"));
        assert!(joined.contains("StrictHostKeyChecking=accept-new"));
    }

    #[test]
    fn scp_uses_capital_port_flag() {
        let options = SshOptions {
            port: 2222,
            ..SshOptions::default()
        };
        let args = options.client_args(&session(), "-P");
        assert!(args.windows(2).any(|w| w[0] == "-P" && w[1] == "2222"));
    }

    #[test]
    fn remote_shell_spec_quotes_key_path() {
        let session = RemoteSession::new(
            SshUser::parse("deploy").unwrap(),
            RemoteHost::parse("example.test").unwrap(),
            "/home/me/my keys/id",
        );
        let spec = SshOptions::default().remote_shell_spec(&session);
        assert!(spec.starts_with("ssh -i '/home/me/my keys/id' -p 22"));
    }

    #[test]
    fn command_renders_remote_words_as_one_argument() {
        let shell = SshShell::new(session(), SshOptions::default());
        let cmd = shell.command(&RemoteCommand::sudo("mkdir").args(["-p", "/opt/my app"]));
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(args[args.len() - 2], "deploy@10.0.0.5");
        assert_eq!(args[args.len() - 1], "sudo -n mkdir -p '/opt/my app'");
    }

    /// Stdin of a child that already exited, or never got started
    struct ClosedPipe(io::ErrorKind);

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn early_exit_of_remote_command_is_not_a_transport_error() {
        assert!(feed_stdin(ClosedPipe(io::ErrorKind::BrokenPipe), "server {}").is_ok());
    }

    #[test]
    fn other_stdin_failures_still_surface() {
        let err = feed_stdin(ClosedPipe(io::ErrorKind::PermissionDenied), "server {}").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn stdin_receives_the_whole_input() {
        let mut sink = Vec::new();
        feed_stdin(&mut sink, "server {}\n").unwrap();
        assert_eq!(sink, b"server {}\n");
    }
}
