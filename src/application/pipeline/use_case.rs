//! Orchestrator
//!
//! Runs the forward pipeline (collect, sync, connect, provision, transfer,
//! deploy, proxy, validate) or the teardown path. Stages run strictly in
//! order; the first failure stops the run and is returned as a
//! [`StageFailure`] naming the stage.
//!
//! The interrupt flag is checked around every stage. A stage that fails
//! while the flag is set is reported as interrupted, since Ctrl-C also
//! reaches the ssh and git children and makes them fail.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::application::collect::ConfigCollector;
use crate::application::connectivity::test_connection;
use crate::application::container::ContainerDeployer;
use crate::application::provision::EnvironmentProvisioner;
use crate::application::proxy::ProxyConfigurator;
use crate::application::repo_sync::RepositorySync;
use crate::application::teardown::Teardown;
use crate::application::transfer::ArtifactTransfer;
use crate::application::validate::DeploymentValidator;
use crate::domain::entities::DeploymentConfig;
use crate::domain::value_objects::DeploymentStage;
use crate::error::{DeployError, DeployResult, StageFailure};

use super::options::{Collaborators, PipelineOptions};
use super::result::{DeploymentSummary, TeardownSummary};
use super::workspace::TransientDir;

pub struct Orchestrator<'a> {
    ports: Collaborators<'a>,
    options: PipelineOptions,
    interrupted: Arc<AtomicBool>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        ports: Collaborators<'a>,
        options: PipelineOptions,
        interrupted: Arc<AtomicBool>,
    ) -> Self {
        Self {
            ports,
            options,
            interrupted,
        }
    }

    /// Deploy a repository end to end
    pub fn deploy(&self) -> Result<DeploymentSummary, StageFailure> {
        let result = self.run_deploy();
        if let Err(failure) = &result {
            self.report_failure(failure);
        }
        result
    }

    /// Remove a deployment from its host
    pub fn teardown(&self) -> Result<TeardownSummary, StageFailure> {
        let result = self.run_teardown();
        if let Err(failure) = &result {
            self.report_failure(failure);
        }
        result
    }

    fn run_deploy(&self) -> Result<DeploymentSummary, StageFailure> {
        let config = self.stage(DeploymentStage::CollectInput, || {
            self.collector().collect()
        })?;
        self.ports.secrets.register(config.token());

        let workspace = TransientDir::new(self.options.work_root.join(config.project_name()));
        let outcome = self.deploy_collected(&config, &workspace);

        let path = workspace.path().to_path_buf();
        match workspace.remove() {
            Ok(()) => tracing::debug!(path = %path.display(), "working copy removed"),
            Err(e) => self.ports.log.warning(&format!(
                "Could not remove working copy {}: {}",
                path.display(),
                e
            )),
        }
        outcome
    }

    fn deploy_collected(
        &self,
        config: &DeploymentConfig,
        workspace: &TransientDir,
    ) -> Result<DeploymentSummary, StageFailure> {
        let log = self.ports.log;

        self.stage(DeploymentStage::SyncRepo, || {
            RepositorySync::new(self.ports.git, log, &self.options.token_user)
                .sync(config, workspace.path())
        })?;

        let shell = self.ports.connector.shell(config.session());
        let shell = shell.as_ref();

        self.stage(DeploymentStage::TestConnection, || test_connection(shell, log))?;

        self.stage(DeploymentStage::ProvisionHost, || {
            EnvironmentProvisioner::new(shell, log).provision(config.user())
        })?;

        let transfer_method = self.stage(DeploymentStage::TransferFiles, || {
            let transfer = self
                .ports
                .connector
                .transfer(config.session())
                .map_err(|e| DeployError::Transfer(e.to_string()))?;
            ArtifactTransfer::new(shell, transfer.as_ref(), log).transfer(
                workspace.path(),
                config.remote_dir(),
                config.user(),
            )?;
            Ok(transfer.name())
        })?;

        let container = self.stage(DeploymentStage::DeployContainer, || {
            ContainerDeployer::new(shell, log, self.options.settle).deploy(config)
        })?;

        self.stage(DeploymentStage::ConfigureProxy, || {
            ProxyConfigurator::new(shell, log).configure(config)
        })?;

        let validation = self.stage(DeploymentStage::Validate, || {
            DeploymentValidator::new(shell, log).validate(config, &container.descriptor)
        })?;

        let summary = DeploymentSummary {
            project_name: config.project_name().to_string(),
            public_url: format!("http://{}/", config.host()),
            internal_port: config.port(),
            branch: config.branch().to_string(),
            remote_dir: config.remote_dir().to_string(),
            descriptor: container.descriptor,
            transfer_method,
            container_state: validation.container_state,
            http_status: validation.http_status,
            log_file: self.options.log_file.clone(),
        };
        log.success(&format!(
            "Deployment complete: {} is live at {}",
            summary.project_name, summary.public_url
        ));
        Ok(summary)
    }

    fn run_teardown(&self) -> Result<TeardownSummary, StageFailure> {
        let target = self.guarded(DeploymentStage::Teardown, || {
            self.collector().collect_teardown()
        })?;

        let shell = self.ports.connector.shell(target.session());
        let report = self.stage(DeploymentStage::Teardown, || {
            Teardown::new(shell.as_ref(), self.ports.log).run(&target)
        })?;

        Ok(TeardownSummary {
            project_name: target.project_name().to_string(),
            destination: target.session().destination(),
            remote_dir: target.remote_dir().to_string(),
            report,
            log_file: self.options.log_file.clone(),
        })
    }

    fn collector(&self) -> ConfigCollector<'_> {
        ConfigCollector::new(self.ports.prompter, &self.options.defaults)
            .with_network(self.options.network)
            .with_home(self.options.home.clone())
    }

    /// Announce and run one stage
    fn stage<T>(
        &self,
        stage: DeploymentStage,
        run: impl FnOnce() -> DeployResult<T>,
    ) -> Result<T, StageFailure> {
        self.check_interrupt(stage)?;
        self.ports.log.info(&stage_header(stage));
        self.guarded(stage, run)
    }

    /// Run one stage without a header
    fn guarded<T>(
        &self,
        stage: DeploymentStage,
        run: impl FnOnce() -> DeployResult<T>,
    ) -> Result<T, StageFailure> {
        self.check_interrupt(stage)?;
        tracing::debug!(stage = %stage, code = stage.code(), "stage started");

        match run() {
            Ok(value) => {
                self.check_interrupt(stage)?;
                Ok(value)
            }
            Err(_) if self.is_interrupted() => {
                Err(StageFailure::new(stage, DeployError::Interrupted))
            }
            Err(cause) => Err(StageFailure::new(stage, cause)),
        }
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    fn check_interrupt(&self, stage: DeploymentStage) -> Result<(), StageFailure> {
        if self.is_interrupted() {
            return Err(StageFailure::new(stage, DeployError::Interrupted));
        }
        Ok(())
    }

    fn report_failure(&self, failure: &StageFailure) {
        let log = self.ports.log;
        match &failure.cause {
            DeployError::UserCancelled => log.info("Cancelled; nothing was changed"),
            DeployError::Interrupted => log.warning(&format!(
                "Interrupted during {}; the host may be partially updated, rerun to converge",
                failure.stage
            )),
            _ => log.error(&failure.to_string()),
        }
        tracing::debug!(stage = %failure.stage, exit_code = failure.exit_code(), "run failed");
    }
}

fn stage_header(stage: DeploymentStage) -> String {
    let total = DeploymentStage::PIPELINE.len();
    match DeploymentStage::PIPELINE.iter().position(|s| *s == stage) {
        Some(index) => format!("Stage {}/{}: {}", index + 1, total, stage.label()),
        None => format!("Stage: {}", stage.label()),
    }
}
