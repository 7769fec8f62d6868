//! Styled text fragments, rendered plain when color is off.

use crossterm::style::{Color, Stylize};

use crate::ui::theme::colors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredText {
    text: String,
    tint: Color,
    bold: bool,
}

macro_rules! tinted {
    ($($name:ident => $color:expr),* $(,)?) => {
        $(
            pub fn $name(text: impl Into<String>) -> Self {
                Self { text: text.into(), tint: $color, bold: false }
            }
        )*
    };
}

impl ColoredText {
    tinted! {
        success => colors::SUCCESS,
        error => colors::ERROR,
        warning => colors::WARNING,
        info => colors::INFO,
        dim => colors::DIM,
    }

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn render(&self, supports_color: bool) -> String {
        match (supports_color, self.bold) {
            (false, _) => self.text.clone(),
            (true, false) => self.text.as_str().with(self.tint).to_string(),
            (true, true) => self.text.as_str().with(self.tint).bold().to_string(),
        }
    }
}
