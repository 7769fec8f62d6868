//! In-memory collaborators for stage and pipeline tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io;
use std::path::Path;
use std::rc::Rc;

use crate::domain::entities::RemoteSession;
use crate::domain::ports::{
    CommandOutput, DeployLog, FileTransfer, GitError, LogLevel, Prompter, RemoteConnector,
    RemoteShell, SecretRegistry, ShellError, SourceControl, TransferError,
};
use crate::domain::value_objects::{AccessToken, AuthenticatedRemote, BranchName, RemoteCommand};

// ---------------------------------------------------------------------------
// Remote host
// ---------------------------------------------------------------------------

#[derive(Default, Debug)]
pub struct HostState {
    pub containers: BTreeSet<String>,
    pub images: BTreeSet<String>,
    /// remote directory -> file names in it
    pub dirs: BTreeMap<String, Vec<String>>,
    /// absolute path -> content
    pub files: BTreeMap<String, String>,
    /// link path -> target
    pub links: BTreeMap<String, String>,
    pub stacks: BTreeSet<String>,
    /// commands found by `command -v`
    pub installed: BTreeSet<String>,
}

/// Simulated deployment host.
///
/// Understands the commands the stages issue well enough to converge like a
/// real host: running a container twice without removing it fails, removing
/// something absent fails the way docker does, and so on. `respond` rules
/// override the simulation for commands whose rendering contains a pattern.
#[derive(Default)]
pub struct FakeHost {
    commands: RefCell<Vec<RemoteCommand>>,
    inputs: RefCell<Vec<String>>,
    overrides: RefCell<Vec<(String, CommandOutput)>>,
    pub state: RefCell<HostState>,
    unreachable: bool,
}

impl FakeHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn unreachable() -> Rc<Self> {
        Rc::new(Self {
            unreachable: true,
            ..Self::default()
        })
    }

    /// Answer every command whose rendering contains `pattern` with `output`
    pub fn respond(&self, pattern: &str, output: CommandOutput) {
        self.overrides
            .borrow_mut()
            .push((pattern.to_string(), output));
    }

    /// Rendered commands, in issue order
    pub fn rendered(&self) -> Vec<String> {
        self.commands.borrow().iter().map(|c| c.render()).collect()
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.borrow().clone()
    }

    pub fn count(&self, pattern: &str) -> usize {
        self.rendered().iter().filter(|c| c.contains(pattern)).count()
    }

    pub fn ran(&self, pattern: &str) -> bool {
        self.count(pattern) > 0
    }

    pub fn index_of(&self, pattern: &str) -> Option<usize> {
        self.rendered().iter().position(|c| c.contains(pattern))
    }

    fn simulate(&self, words: &[String], input: Option<&str>) -> CommandOutput {
        if self.unreachable {
            return CommandOutput::failed(255, "ssh: connect to host 10.0.0.5 port 22: Connection timed out");
        }

        let mut state = self.state.borrow_mut();
        let w: Vec<&str> = words.iter().map(String::as_str).collect();
        match w.as_slice() {
            ["sh", "-c", script] => match script.strip_prefix("command -v ") {
                Some(name) if state.installed.contains(name) => CommandOutput::ok(format!("/usr/bin/{}\n", name)),
                Some(_) => CommandOutput::failed(1, ""),
                None => CommandOutput::ok(""),
            },
            ["env", .., "install", "--no-upgrade", package] => {
                let command = if *package == "docker.io" { "docker" } else { *package };
                state.installed.insert(command.to_string());
                CommandOutput::ok("")
            }
            ["echo", marker] => CommandOutput::ok(format!("{}\n", marker)),
            ["ls", "-1A", dir] => match state.dirs.get(*dir) {
                Some(names) => CommandOutput::ok(names.join("\n")),
                None => CommandOutput::failed(2, format!("ls: cannot access '{}': No such file or directory", dir)),
            },
            ["mkdir", "-p", dir] => {
                state.dirs.entry(dir.to_string()).or_default();
                CommandOutput::ok("")
            }
            ["rm", "-rf", dir] => {
                state.dirs.remove(*dir);
                CommandOutput::ok("")
            }
            ["docker", "stop", name] | ["docker", "rm", name] if !state.containers.contains(*name) => {
                CommandOutput::failed(1, format!("Error response from daemon: No such container: {}", name))
            }
            ["docker", "stop", name] => CommandOutput::ok(format!("{}\n", name)),
            ["docker", "rm", name] => {
                state.containers.remove(*name);
                CommandOutput::ok(format!("{}\n", name))
            }
            ["docker", "rmi", "-f", name] => {
                if state.images.remove(*name) {
                    CommandOutput::ok(format!("Untagged: {}:latest\n", name))
                } else {
                    CommandOutput::failed(1, format!("Error: No such image: {}", name))
                }
            }
            ["docker", "build", "-t", name, _dir] => {
                state.images.insert(name.to_string());
                CommandOutput::ok("Successfully built 0123456789ab\n")
            }
            ["docker", "run", rest @ ..] => {
                let name = rest
                    .windows(2)
                    .find(|pair| pair[0] == "--name")
                    .map(|pair| pair[1].to_string())
                    .unwrap_or_default();
                if state.containers.contains(&name) {
                    CommandOutput::failed(
                        125,
                        format!("docker: Error response from daemon: Conflict. The container name \"/{}\" is already in use.", name),
                    )
                } else {
                    state.containers.insert(name);
                    CommandOutput::ok("4f9c2d1e\n")
                }
            }
            ["docker", "inspect", "-f", _, name] => {
                if state.containers.contains(*name) {
                    CommandOutput::ok("running\n")
                } else {
                    CommandOutput::failed(1, format!("Error: No such object: {}", name))
                }
            }
            ["docker-compose", "--project-directory", _, "-f", _, "-p", project, "down", ..] => {
                state.stacks.remove(*project);
                CommandOutput::ok("")
            }
            ["docker-compose", "--project-directory", _, "-f", _, "-p", project, "up", ..] => {
                state.stacks.insert(project.to_string());
                CommandOutput::ok("")
            }
            ["docker-compose", "--project-directory", _, "-f", _, "-p", project, "ps", "--services", "--filter", "status=running"] => {
                if state.stacks.contains(*project) {
                    CommandOutput::ok("web\n")
                } else {
                    CommandOutput::ok("")
                }
            }
            ["tee", path] => {
                state
                    .files
                    .insert(path.to_string(), input.unwrap_or_default().to_string());
                CommandOutput::ok(input.unwrap_or_default())
            }
            ["ln", "-sfn", target, link] => {
                state.links.insert(link.to_string(), target.to_string());
                CommandOutput::ok("")
            }
            ["rm", "-f", paths @ ..] => {
                for path in paths {
                    state.links.remove(*path);
                    state.files.remove(*path);
                }
                CommandOutput::ok("")
            }
            ["find", dir, "-mindepth", "1", "-maxdepth", "1", "!", "-name", keep, "-exec", "grep", "-qF", marker, "{}", ";", "-delete"] => {
                let prefix = format!("{}/", dir);
                let doomed: Vec<String> = state
                    .links
                    .iter()
                    .filter(|(link, target)| {
                        link.strip_prefix(&prefix).is_some_and(|name| name != *keep)
                            && state.files.get(*target).is_some_and(|c| c.contains(*marker))
                    })
                    .map(|(link, _)| link.clone())
                    .collect();
                for link in doomed {
                    state.links.remove(&link);
                }
                CommandOutput::ok("")
            }
            ["curl", ..] => CommandOutput::ok("200"),
            _ => CommandOutput::ok(""),
        }
    }
}

/// Cloneable handle so the connector can hand out boxed shells
pub struct HostShell(pub Rc<FakeHost>);

impl RemoteShell for HostShell {
    fn destination(&self) -> String {
        "deploy@10.0.0.5".to_string()
    }

    fn run(&self, command: &RemoteCommand, input: Option<&str>) -> Result<CommandOutput, ShellError> {
        let host = &self.0;
        host.commands.borrow_mut().push(command.clone());
        if let Some(input) = input {
            host.inputs.borrow_mut().push(input.to_string());
        }

        let rendered = command.render();
        if let Some((_, output)) = host
            .overrides
            .borrow()
            .iter()
            .rev()
            .find(|(pattern, _)| rendered.contains(pattern.as_str()))
        {
            return Ok(output.clone());
        }

        let skip = if command.is_privileged() { 2 } else { 0 };
        let words: Vec<String> = command
            .argv()
            .into_iter()
            .skip(skip)
            .map(str::to_string)
            .collect();
        Ok(host.simulate(&words, input))
    }
}

/// Copies local file names into the host's directory listing
pub struct FakeTransfer {
    host: Rc<FakeHost>,
    fail: bool,
}

impl FileTransfer for FakeTransfer {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn transfer(&self, local_dir: &Path, remote_dir: &str) -> Result<(), TransferError> {
        if self.fail {
            return Err(TransferError::CommandFailed("rsync: connection unexpectedly closed".to_string()));
        }
        let mut names: Vec<String> = std::fs::read_dir(local_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        self.host
            .state
            .borrow_mut()
            .dirs
            .insert(remote_dir.to_string(), names);
        Ok(())
    }
}

pub struct FakeConnector {
    pub host: Rc<FakeHost>,
    pub fail_transfer: bool,
    pub transfers: RefCell<usize>,
}

impl FakeConnector {
    pub fn new(host: Rc<FakeHost>) -> Self {
        Self {
            host,
            fail_transfer: false,
            transfers: RefCell::new(0),
        }
    }
}

impl RemoteConnector for FakeConnector {
    fn shell(&self, _session: &RemoteSession) -> Box<dyn RemoteShell> {
        Box::new(HostShell(Rc::clone(&self.host)))
    }

    fn transfer(&self, _session: &RemoteSession) -> Result<Box<dyn FileTransfer>, TransferError> {
        *self.transfers.borrow_mut() += 1;
        Ok(Box::new(FakeTransfer {
            host: Rc::clone(&self.host),
            fail: self.fail_transfer,
        }))
    }
}

// ---------------------------------------------------------------------------
// Git
// ---------------------------------------------------------------------------

/// Writes `files` into the destination on clone; records every call
#[derive(Default)]
pub struct FakeGit {
    pub files: Vec<(&'static str, &'static str)>,
    pub calls: RefCell<Vec<String>>,
    pub fail_clone: Option<String>,
    pub missing_branch: bool,
    /// Echo the authenticated URL in the clone failure, like a chatty git would
    pub leak_url_on_failure: bool,
}

impl FakeGit {
    pub fn with_files(files: &[(&'static str, &'static str)]) -> Self {
        Self {
            files: files.to_vec(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SourceControl for FakeGit {
    fn clone_repo(&self, remote: &AuthenticatedRemote, dest: &Path) -> Result<(), GitError> {
        self.calls.borrow_mut().push(format!(
            "clone {} credentials={}",
            remote.plain(),
            remote.has_credentials()
        ));
        if let Some(reason) = &self.fail_clone {
            let mut detail = reason.clone();
            if self.leak_url_on_failure {
                if let Some(url) = remote.authenticated_url() {
                    detail = format!("{} for '{}'", reason, url);
                }
            }
            return Err(GitError::new("clone", detail));
        }
        std::fs::create_dir_all(dest.join(".git"))
            .map_err(|e| GitError::new("clone", e.to_string()))?;
        std::fs::write(dest.join(".git/config"), format!("url = {}\n", remote.plain()))
            .map_err(|e| GitError::new("clone", e.to_string()))?;
        for (name, content) in &self.files {
            std::fs::write(dest.join(name), content)
                .map_err(|e| GitError::new("clone", e.to_string()))?;
        }
        Ok(())
    }

    fn set_remote_url(&self, _repo: &Path, url: &str) -> Result<(), GitError> {
        self.calls.borrow_mut().push(format!("set-url {}", url));
        Ok(())
    }

    fn fetch(&self, _repo: &Path, remote: &AuthenticatedRemote) -> Result<(), GitError> {
        self.calls
            .borrow_mut()
            .push(format!("fetch credentials={}", remote.has_credentials()));
        Ok(())
    }

    fn checkout(&self, _repo: &Path, branch: &BranchName) -> Result<(), GitError> {
        self.calls.borrow_mut().push(format!("checkout {}", branch));
        if self.missing_branch {
            return Err(GitError::new(
                "checkout",
                format!("error: pathspec '{}' did not match any file(s) known to git", branch),
            ));
        }
        Ok(())
    }

    fn pull(
        &self,
        _repo: &Path,
        _remote: &AuthenticatedRemote,
        branch: &BranchName,
    ) -> Result<(), GitError> {
        self.calls.borrow_mut().push(format!("pull {}", branch));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

/// Replays canned answers; an empty answer takes the offered default
pub struct ScriptedPrompter {
    inputs: RefCell<VecDeque<String>>,
    secrets: RefCell<VecDeque<String>>,
    confirms: RefCell<VecDeque<bool>>,
    notices: RefCell<Vec<String>>,
    prompts: RefCell<usize>,
}

impl ScriptedPrompter {
    pub fn new(inputs: &[&str], secrets: &[&str], confirms: &[bool]) -> Self {
        Self {
            inputs: RefCell::new(inputs.iter().map(|s| s.to_string()).collect()),
            secrets: RefCell::new(secrets.iter().map(|s| s.to_string()).collect()),
            confirms: RefCell::new(confirms.iter().copied().collect()),
            notices: RefCell::new(Vec::new()),
            prompts: RefCell::new(0),
        }
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }

    pub fn prompts(&self) -> usize {
        *self.prompts.borrow()
    }
}

fn exhausted() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
}

impl Prompter for ScriptedPrompter {
    fn input(&self, _prompt: &str, default: Option<&str>) -> io::Result<String> {
        *self.prompts.borrow_mut() += 1;
        let answer = self.inputs.borrow_mut().pop_front().ok_or_else(exhausted)?;
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn secret(&self, _prompt: &str) -> io::Result<String> {
        *self.prompts.borrow_mut() += 1;
        self.secrets.borrow_mut().pop_front().ok_or_else(exhausted)
    }

    fn confirm(&self, _prompt: &str, _default: bool) -> io::Result<bool> {
        *self.prompts.borrow_mut() += 1;
        self.confirms.borrow_mut().pop_front().ok_or_else(exhausted)
    }

    fn notice(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingLog {
    lines: RefCell<Vec<(LogLevel, String)>>,
}

impl RecordingLog {
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.borrow().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(_, l)| l.contains(needle))
    }

    pub fn at(&self, level: LogLevel) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl DeployLog for RecordingLog {
    fn log(&self, level: LogLevel, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingSecrets {
    pub registered: RefCell<usize>,
}

impl SecretRegistry for RecordingSecrets {
    fn register(&self, _token: &AccessToken) {
        *self.registered.borrow_mut() += 1;
    }
}
