use std::path::Path;

use hoist::{DeployError, DeploymentStage, StageFailure};

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::context::UiContext;

/// What the operator can check next for a failed stage
pub fn hint(stage: DeploymentStage) -> Option<&'static str> {
    match stage {
        DeploymentStage::CollectInput => None,
        DeploymentStage::SyncRepo => Some(
            "Check the repository URL, that the token can read the repository, and the branch name",
        ),
        DeploymentStage::TestConnection => {
            Some("Check host, user and key; the same 'ssh -i <key> <user>@<host>' must work without a password")
        }
        DeploymentStage::ProvisionHost => {
            Some("The SSH user needs passwordless sudo on an apt-based host")
        }
        DeploymentStage::TransferFiles => {
            Some("Install rsync (or scp) locally; the SSH user needs sudo to create the remote directory")
        }
        DeploymentStage::DeployContainer => {
            Some("The build or container output above shows why; fix the repository and rerun")
        }
        DeploymentStage::ConfigureProxy => Some("Run 'sudo nginx -t' on the host for details"),
        DeploymentStage::Validate => {
            Some("Make sure the application listens on the port you entered; the run log has the container logs")
        }
        DeploymentStage::Teardown => Some("Teardown is safe to rerun once the cause is fixed"),
    }
}

/// Failure block; `None` for clean exits (cancellation) that need no report
pub fn render_failure(
    failure: &StageFailure,
    message: &str,
    log_file: &Path,
    ui: &UiContext,
) -> Option<String> {
    let title = match failure.cause {
        DeployError::UserCancelled => return None,
        DeployError::Interrupted => format!("Interrupted during {}", failure.stage),
        _ => format!("{} failed", failure.stage),
    };
    let fix = match failure.cause {
        DeployError::Interrupted => Some("Rerun hoist; every stage converges on rerun"),
        _ => hint(failure.stage),
    };

    Some(
        ErrorBlock::new(title, message, failure.exit_code())
            .with_fix(fix)
            .with_log_file(log_file)
            .render(ui.color, ui.unicode, ui.caps.width),
    )
}
