use hoist::application::TeardownSummary;

use crate::ui::blocks::summary::ResultSummary;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

pub fn render_teardown_summary(summary: &TeardownSummary, ui: &UiContext) -> String {
    let title = if summary.removed_anything() {
        "Deployment removed"
    } else {
        "Nothing left to remove"
    };
    let mut block = ResultSummary::success(Icon::Trash, title);
    block.add_field("Project", summary.project_name.as_str());
    block.add_field("Host", summary.destination.as_str());
    block.add_field("Remote dir", format!("{} (deleted)", summary.remote_dir));
    if let Some(log) = &summary.log_file {
        block.add_field("Run log", log.display().to_string());
    }

    let report = &summary.report;
    if report.removed_stack {
        block.add_note("Compose stack and its images removed");
    }
    if report.removed_container {
        block.add_note("Container removed");
    }
    if report.removed_image {
        block.add_note("Image removed");
    }
    if report.reloaded_proxy {
        block.add_note("nginx reloaded without the site");
    }

    block.render(ui.color, ui.unicode, ui.caps.width)
}
