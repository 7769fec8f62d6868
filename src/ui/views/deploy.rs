use hoist::application::DeploymentSummary;

use crate::ui::blocks::summary::ResultSummary;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

pub fn render_deploy_summary(summary: &DeploymentSummary, ui: &UiContext) -> String {
    let mut block = ResultSummary::success(Icon::Deploy, "Deployment complete");
    block.add_field("URL", summary.public_url.as_str());
    block.add_field("Project", summary.project_name.as_str());
    block.add_field("Branch", summary.branch.as_str());
    block.add_field("Internal port", summary.internal_port.to_string());
    block.add_field("Remote dir", summary.remote_dir.as_str());
    block.add_field("Built from", summary.descriptor.file_name());
    if let Some(log) = &summary.log_file {
        block.add_field("Run log", log.display().to_string());
    }

    block.add_note(format!("Container {}", summary.container_state));
    block.add_note(format!("nginx answered HTTP {}", summary.http_status));
    block.add_note(format!("Files copied with {}", summary.transfer_method));
    block.with_next_step("rerun hoist to redeploy; hoist --teardown to remove");

    block.render(ui.color, ui.unicode, ui.caps.width)
}
