//! Console sink for the operator log

use hoist::domain::ports::{DeployLog, LogLevel};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Continuation lines of multi-line messages (remote output) are indented by this
const CONTINUATION_INDENT: &str = "    ";

/// Writes log lines to the terminal; warnings and errors go to stderr
pub struct ConsoleLog {
    ui: UiContext,
}

impl ConsoleLog {
    pub fn new(ui: UiContext) -> Self {
        Self { ui }
    }
}

impl DeployLog for ConsoleLog {
    fn log(&self, level: LogLevel, message: &str) {
        let line = format_console_line(&self.ui, level, message);
        match level {
            LogLevel::Warning | LogLevel::Error => eprintln!("{}", line),
            LogLevel::Info | LogLevel::Success => println!("{}", line),
        }
    }
}

pub fn format_console_line(ui: &UiContext, level: LogLevel, message: &str) -> String {
    let (color, unicode) = (ui.color, ui.unicode);
    let mut lines = message.lines();
    let first = lines.next().unwrap_or_default();

    // stage headers stand out from the chatter around them
    let head = if level == LogLevel::Info && first.starts_with("Stage ") {
        format!(
            "\n{} {}",
            Icon::Stage.colored(color, unicode),
            ColoredText::info(first).bold().render(color)
        )
    } else {
        let text = match level {
            LogLevel::Info => first.to_string(),
            LogLevel::Success => ColoredText::success(first).render(color),
            LogLevel::Warning => ColoredText::warning(first).render(color),
            LogLevel::Error => ColoredText::error(first).bold().render(color),
        };
        format!("{} {}", Icon::for_level(level).colored(color, unicode), text)
    };

    lines.fold(head, |mut out, rest| {
        out.push('\n');
        out.push_str(CONTINUATION_INDENT);
        out.push_str(&ColoredText::dim(rest).render(color));
        out
    })
}
