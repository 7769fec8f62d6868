use std::path::{Path, PathBuf};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::r#box::{Box, BoxStyle};

/// Failure report printed after a stage fails
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    title: String,
    message: String,
    fix: Option<String>,
    log_file: Option<PathBuf>,
    exit_code: i32,
}

impl ErrorBlock {
    pub fn new(title: impl Into<String>, message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            fix: None,
            log_file: None,
            exit_code,
        }
    }

    pub fn with_fix(mut self, fix: Option<&str>) -> Self {
        self.fix = fix.map(str::to_string);
        self
    }

    pub fn with_log_file(mut self, path: &Path) -> Self {
        self.log_file = Some(path.to_path_buf());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool, width: u16) -> String {
        let header = format!(
            "{} {}",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error(self.title.as_str())
                .bold()
                .render(supports_color)
        );
        let mut b = Box::with_title(header)
            .style(BoxStyle::Error)
            .max_width(width);

        b.add_empty();
        b.add_line(self.message.clone());

        if let Some(fix) = &self.fix {
            b.add_empty();
            b.add_line(format!(
                "{} {}",
                Icon::Arrow.colored(supports_color, supports_unicode),
                fix
            ));
        }

        b.add_empty();
        if let Some(path) = &self.log_file {
            b.add_line(
                ColoredText::dim(format!("Run log: {}", path.display())).render(supports_color),
            );
        }
        b.add_line(ColoredText::dim(format!("Exit status: {}", self.exit_code)).render(supports_color));

        b.render(supports_color, supports_unicode)
    }
}
