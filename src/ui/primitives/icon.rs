//! Status glyphs for console lines and summary blocks.

use crossterm::style::{Color, Stylize};

use hoist::domain::ports::LogLevel;

use crate::ui::theme::{colors, icons, icons_ascii};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Arrow,
    Stage,
    Deploy,
    Trash,
}

impl Icon {
    /// Glyph that leads a run log line of the given level
    pub fn for_level(level: LogLevel) -> Self {
        match level {
            LogLevel::Info => Icon::Progress,
            LogLevel::Success => Icon::Success,
            LogLevel::Warning => Icon::Warning,
            LogLevel::Error => Icon::Error,
        }
    }

    /// (unicode glyph, ascii fallback, tint)
    fn token(self) -> (&'static str, &'static str, Color) {
        match self {
            Icon::Success => (icons::OK, icons_ascii::OK, colors::SUCCESS),
            Icon::Error => (icons::FAIL, icons_ascii::FAIL, colors::ERROR),
            Icon::Warning => (icons::WARN, icons_ascii::WARN, colors::WARNING),
            Icon::Progress => (icons::STEP, icons_ascii::STEP, colors::DIM),
            Icon::Arrow => (icons::HINT, icons_ascii::HINT, colors::DIM),
            Icon::Stage => (icons::STAGE, icons_ascii::STAGE, colors::INFO),
            Icon::Deploy => (icons::LAUNCH, icons_ascii::LAUNCH, colors::INFO),
            Icon::Trash => (icons::REMOVE, icons_ascii::REMOVE, colors::WARNING),
        }
    }

    pub fn render(&self, supports_unicode: bool) -> &'static str {
        let (glyph, ascii, _) = self.token();
        if supports_unicode {
            glyph
        } else {
            ascii
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let glyph = self.render(supports_unicode);
        if supports_color {
            glyph.with(self.token().2).to_string()
        } else {
            glyph.to_string()
        }
    }
}
