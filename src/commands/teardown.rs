use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::Result;
use hoist::presentation::Cli;
use hoist::Orchestrator;

use super::RunSession;
use crate::ui::views::teardown::render_teardown_summary;

/// `hoist --teardown`: identify, confirm and remove a deployment
pub fn cmd_teardown(cli: &Cli, interrupted: Arc<AtomicBool>) -> Result<()> {
    let session = RunSession::start(cli, interrupted)?;
    let orchestrator = Orchestrator::new(
        session.collaborators(),
        session.options(),
        session.interrupted(),
    );

    match orchestrator.teardown() {
        Ok(summary) => {
            print!("{}", render_teardown_summary(&summary, session.ui()));
            Ok(())
        }
        Err(failure) => Err(session.fail(failure)),
    }
}
