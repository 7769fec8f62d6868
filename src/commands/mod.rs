//! Command plumbing shared by the deploy and teardown entry points.

pub mod deploy;
pub mod teardown;

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{Context, Result};
use hoist::application::{Collaborators, PipelineOptions};
use hoist::config::Settings;
use hoist::domain::ports::DeployLog;
use hoist::infrastructure::{GitCli, Redactor, SshConnector};
use hoist::presentation::{factory, Cli, RunLog};
use hoist::StageFailure;

use crate::ui::context::UiContext;
use crate::ui::log::ConsoleLog;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::prompt::DialoguerPrompter;
use crate::ui::views::failure::render_failure;

/// Everything one run needs, wired up
pub struct RunSession {
    settings: Settings,
    cwd: PathBuf,
    ui: UiContext,
    redactor: Redactor,
    log: RunLog,
    prompter: DialoguerPrompter,
    git: GitCli,
    connector: SshConnector,
    interrupted: Arc<AtomicBool>,
}

impl RunSession {
    pub fn start(cli: &Cli, interrupted: Arc<AtomicBool>) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine the current directory")?;
        let (settings, warnings, source) = Settings::discover(cli.config.as_deref(), &cwd)?;
        let ui = UiContext::new(cli.color, &settings);

        for warning in &warnings {
            eprintln!(
                "{} {}",
                Icon::Warning.colored(ui.color, ui.unicode),
                ColoredText::warning(warning.to_string()).render(ui.color)
            );
        }

        let redactor = factory::create_redactor();
        let log = RunLog::open(&cwd, ConsoleLog::new(ui), redactor.clone())
            .with_context(|| format!("cannot create the run log in {}", cwd.display()))?;

        log.info(&format!(
            "hoist {} (run log: {})",
            env!("CARGO_PKG_VERSION"),
            log.path().display()
        ));
        match &source {
            Some(path) => log.info(&format!("Settings loaded from {}", path.display())),
            None => tracing::debug!("no settings file found; using defaults"),
        }

        Ok(Self {
            connector: factory::create_connector(&settings),
            git: GitCli::default(),
            prompter: DialoguerPrompter::new(ui, Arc::clone(&interrupted)),
            settings,
            cwd,
            ui,
            redactor,
            log,
            interrupted,
        })
    }

    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            prompter: &self.prompter,
            git: &self.git,
            connector: &self.connector,
            log: &self.log,
            secrets: &self.redactor,
        }
    }

    pub fn options(&self) -> PipelineOptions {
        PipelineOptions::from_settings(&self.settings, &self.cwd).with_log_file(self.log.path())
    }

    pub fn interrupted(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    /// Print the failure block (scrubbed) and hand the failure to `main`
    pub fn fail(&self, failure: StageFailure) -> anyhow::Error {
        let message = self.redactor.scrub(&failure.cause.to_string());
        if let Some(block) = render_failure(&failure, &message, self.log.path(), &self.ui) {
            eprint!("{}", block);
        }
        failure.into()
    }
}
