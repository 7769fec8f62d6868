//! Reverse Proxy Configuration
//!
//! Writes the project's nginx site, enables it, disables the distribution's
//! default site and reloads nginx only once `nginx -t` accepts the result.
//!
//! A host carries one active hoist site. Sites left enabled by earlier
//! deploys of other projects are disabled, not deleted, so their
//! definitions stay in `sites-available`.

use crate::domain::entities::{DeploymentConfig, ProxyRule, MANAGED_MARKER};
use crate::domain::ports::{DeployLog, RemoteShell};
use crate::domain::value_objects::RemoteCommand;
use crate::error::{DeployError, DeployResult, ProxyStep};

use super::run_remote;

/// Self-check of the whole nginx configuration
pub fn nginx_check() -> RemoteCommand {
    RemoteCommand::sudo("nginx").arg("-t")
}

pub fn nginx_reload() -> RemoteCommand {
    RemoteCommand::sudo("systemctl").args(["reload", "nginx"])
}

/// Drop every enabled site carrying the hoist marker except `rule`'s own
fn disable_other_managed_sites(rule: &ProxyRule) -> RemoteCommand {
    RemoteCommand::sudo("find").args([
        ProxyRule::enabled_dir(),
        "-mindepth",
        "1",
        "-maxdepth",
        "1",
        "!",
        "-name",
        rule.site_name(),
        "-exec",
        "grep",
        "-qF",
        MANAGED_MARKER,
        "{}",
        ";",
        "-delete",
    ])
}

pub struct ProxyConfigurator<'a> {
    shell: &'a dyn RemoteShell,
    log: &'a dyn DeployLog,
}

impl<'a> ProxyConfigurator<'a> {
    pub fn new(shell: &'a dyn RemoteShell, log: &'a dyn DeployLog) -> Self {
        Self { shell, log }
    }

    pub fn configure(&self, config: &DeploymentConfig) -> DeployResult<ProxyRule> {
        let rule = ProxyRule::new(config.project_name(), config.port());
        self.log.info(&format!(
            "Configuring nginx: port 80 -> 127.0.0.1:{}",
            rule.upstream_port()
        ));

        // content goes over stdin so nothing is interpolated into a shell line
        self.step(
            ProxyStep::Write,
            &RemoteCommand::sudo("tee").arg(rule.available_path()),
            Some(&rule.render()),
        )?;
        self.step(
            ProxyStep::Enable,
            &RemoteCommand::sudo("ln").args(["-sfn".to_string(), rule.available_path(), rule.enabled_path()]),
            None,
        )?;
        self.step(ProxyStep::Enable, &disable_other_managed_sites(&rule), None)?;
        self.step(
            ProxyStep::Enable,
            &RemoteCommand::sudo("rm").args(["-f".to_string(), ProxyRule::default_site_path()]),
            None,
        )?;
        self.step(ProxyStep::Validate, &nginx_check(), None)?;
        self.step(ProxyStep::Reload, &nginx_reload(), None)?;

        self.log.success(&format!("nginx site {} active", rule.site_name()));
        Ok(rule)
    }

    fn step(&self, step: ProxyStep, command: &RemoteCommand, input: Option<&str>) -> DeployResult<()> {
        let output = run_remote(self.shell, command, input)?;
        if !output.success() {
            return Err(DeployError::ProxyConfig {
                step,
                detail: output.combined(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fakes::{FakeHost, HostShell, RecordingLog};
    use crate::domain::entities::RemoteSession;
    use crate::domain::ports::CommandOutput;
    use crate::domain::value_objects::{
        AccessToken, AppPort, NetworkMode, RemoteHost, RepoUrl, SshUser,
    };

    fn config() -> DeploymentConfig {
        config_for("app")
    }

    fn config_for(project: &str) -> DeploymentConfig {
        DeploymentConfig::new(
            RepoUrl::parse(&format!("https://example.test/org/{project}.git")).unwrap(),
            AccessToken::parse("tok").unwrap(),
            None,
            RemoteSession::new(
                SshUser::parse("deploy").unwrap(),
                RemoteHost::parse("10.0.0.5").unwrap(),
                "/k",
            ),
            AppPort::new(3000).unwrap(),
            NetworkMode::Publish,
        )
    }

    #[test]
    fn writes_enables_checks_then_reloads() {
        let host = FakeHost::new();
        ProxyConfigurator::new(&HostShell(host.clone()), &RecordingLog::default())
            .configure(&config())
            .unwrap();

        assert_eq!(
            host.rendered(),
            vec![
                "sudo -n tee /etc/nginx/sites-available/app",
                "sudo -n ln -sfn /etc/nginx/sites-available/app /etc/nginx/sites-enabled/app",
                "sudo -n find /etc/nginx/sites-enabled -mindepth 1 -maxdepth 1 '!' -name app \
                 -exec grep -qF '# Managed by hoist' '{}' ';' -delete",
                "sudo -n rm -f /etc/nginx/sites-enabled/default",
                "sudo -n nginx -t",
                "sudo -n systemctl reload nginx",
            ]
        );
        let inputs = host.inputs();
        assert_eq!(inputs.len(), 1);
        assert!(inputs[0].contains("proxy_pass http://127.0.0.1:3000;"));
    }

    #[test]
    fn rerun_overwrites_single_site() {
        let host = FakeHost::new();
        let shell = HostShell(host.clone());
        let log = RecordingLog::default();
        let proxy = ProxyConfigurator::new(&shell, &log);

        proxy.configure(&config()).unwrap();
        proxy.configure(&config()).unwrap();

        let state = host.state.borrow();
        assert_eq!(state.files.len(), 1);
        assert_eq!(state.links.len(), 1);
    }

    #[test]
    fn second_project_replaces_the_active_site() {
        let host = FakeHost::new();
        {
            // a site the operator wrote by hand
            let mut state = host.state.borrow_mut();
            state.files.insert(
                "/etc/nginx/sites-available/intranet".to_string(),
                "server { listen 8081; }".to_string(),
            );
            state.links.insert(
                "/etc/nginx/sites-enabled/intranet".to_string(),
                "/etc/nginx/sites-available/intranet".to_string(),
            );
        }
        let shell = HostShell(host.clone());
        let log = RecordingLog::default();
        let proxy = ProxyConfigurator::new(&shell, &log);

        proxy.configure(&config_for("app")).unwrap();
        proxy.configure(&config_for("api")).unwrap();

        let state = host.state.borrow();
        let enabled: Vec<&str> = state.links.keys().map(String::as_str).collect();
        assert_eq!(
            enabled,
            vec!["/etc/nginx/sites-enabled/api", "/etc/nginx/sites-enabled/intranet"]
        );
        // disabled, not deleted
        assert!(state.files.contains_key("/etc/nginx/sites-available/app"));
        let commands = host.rendered();
        let cleanup = commands.iter().position(|c| c.contains("-name api")).unwrap();
        assert_eq!(commands[cleanup + 2], "sudo -n nginx -t");
    }

    #[test]
    fn failed_self_check_never_reloads() {
        let host = FakeHost::new();
        host.respond(
            "nginx -t",
            CommandOutput::failed(1, "nginx: [emerg] unknown directive \"proxy_passs\""),
        );

        let err = ProxyConfigurator::new(&HostShell(host.clone()), &RecordingLog::default())
            .configure(&config())
            .unwrap_err();

        assert!(matches!(
            err,
            DeployError::ProxyConfig {
                step: ProxyStep::Validate,
                ..
            }
        ));
        assert!(!host.ran("systemctl reload"));
    }

    #[test]
    fn write_failure_is_tagged() {
        let host = FakeHost::new();
        host.respond("tee", CommandOutput::failed(1, "tee: Permission denied"));

        let err = ProxyConfigurator::new(&HostShell(host), &RecordingLog::default())
            .configure(&config())
            .unwrap_err();
        assert!(matches!(
            err,
            DeployError::ProxyConfig {
                step: ProxyStep::Write,
                ..
            }
        ));
    }
}
