use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;
use hoist::presentation::Cli;
use hoist::Orchestrator;

use super::RunSession;
use crate::ui::views::deploy::render_deploy_summary;

/// `hoist`: collect, confirm and run the full deployment pipeline
pub fn cmd_deploy(cli: &Cli, interrupted: Arc<AtomicBool>) -> Result<()> {
    let session = RunSession::start(cli, interrupted)?;
    let orchestrator = Orchestrator::new(
        session.collaborators(),
        session.options(),
        session.interrupted(),
    );

    match orchestrator.deploy() {
        Ok(summary) => {
            print!("{}", render_deploy_summary(&summary, session.ui()));
            Ok(())
        }
        Err(failure) => Err(session.fail(failure)),
    }
}
