//! Console tokens and the prompt theme.
//!
//! Every glyph and color the binary prints comes from here, so the ASCII
//! fallback and the no-color path stay complete.

use crossterm::style::Color;
use dialoguer::theme::{ColorfulTheme, Theme};
use std::fmt;

/// Semantic colors; nothing else in the UI picks a raw color
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    /// stage headers, summary borders
    pub const INFO: Color = Color::Cyan;
    /// remote output and hints
    pub const DIM: Color = Color::DarkGrey;
}

/// Status glyphs, unicode form
pub mod icons {
    pub const OK: &str = "✓";
    pub const FAIL: &str = "✗";
    pub const WARN: &str = "⚠";
    pub const STEP: &str = "•";
    pub const HINT: &str = "→";
    pub const STAGE: &str = "▶";
    pub const LAUNCH: &str = "🚀";
    pub const REMOVE: &str = "🗑";
}

/// Status glyphs for C/POSIX locales and dumb terminals
pub mod icons_ascii {
    pub const OK: &str = "[OK]";
    pub const FAIL: &str = "[FAIL]";
    pub const WARN: &str = "[WARN]";
    pub const STEP: &str = "-";
    pub const HINT: &str = "->";
    pub const STAGE: &str = "==>";
    pub const LAUNCH: &str = "[DEPLOY]";
    pub const REMOVE: &str = "[DEL]";
}

/// Box corners and edges: top-left, top-right, bottom-left, bottom-right,
/// horizontal, vertical
pub const ROUNDED_FRAME: [&str; 6] = ["╭", "╮", "╰", "╯", "─", "│"];
pub const ASCII_FRAME: [&str; 6] = ["+", "+", "+", "+", "-", "|"];

// ----------------------------------------------------------------------------
// HoistTheme - dialoguer theme with plain fallback
// ----------------------------------------------------------------------------

/// Prompt theme for dialoguer.
///
/// With color it delegates to `ColorfulTheme`; without color (NO_COLOR,
/// `--color never`, dumb terminals) it writes plain `prompt [default]: `
/// lines so prompts stay readable in captured output.
pub struct HoistTheme {
    color: bool,
    inner: ColorfulTheme,
}

impl HoistTheme {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            inner: ColorfulTheme::default(),
        }
    }
}

impl Theme for HoistTheme {
    fn format_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        if self.color {
            return self.inner.format_prompt(f, prompt);
        }
        write!(f, "{}:", prompt)
    }

    fn format_error(&self, f: &mut dyn fmt::Write, err: &str) -> fmt::Result {
        if self.color {
            return self.inner.format_error(f, err);
        }
        write!(f, "error: {}", err)
    }

    fn format_confirm_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<bool>,
    ) -> fmt::Result {
        if self.color {
            return self.inner.format_confirm_prompt(f, prompt, default);
        }
        match default {
            Some(true) => write!(f, "{} [Y/n] ", prompt),
            Some(false) => write!(f, "{} [y/N] ", prompt),
            None => write!(f, "{} [y/n] ", prompt),
        }
    }

    fn format_confirm_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        selection: Option<bool>,
    ) -> fmt::Result {
        if self.color {
            return self
                .inner
                .format_confirm_prompt_selection(f, prompt, selection);
        }
        let answer = match selection {
            Some(true) => "yes",
            Some(false) => "no",
            None => "",
        };
        write!(f, "{} {}", prompt, answer)
    }

    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<&str>,
    ) -> fmt::Result {
        if self.color {
            return self.inner.format_input_prompt(f, prompt, default);
        }
        match default {
            Some(default) if !default.is_empty() => write!(f, "{} [{}]: ", prompt, default),
            _ => write!(f, "{}: ", prompt),
        }
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        if self.color {
            return self.inner.format_input_prompt_selection(f, prompt, sel);
        }
        write!(f, "{}: {}", prompt, sel)
    }

    fn format_password_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        if self.color {
            return self.inner.format_password_prompt(f, prompt);
        }
        write!(f, "{}: ", prompt)
    }

    fn format_password_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
    ) -> fmt::Result {
        if self.color {
            return self.inner.format_password_prompt_selection(f, prompt);
        }
        write!(f, "{}: [hidden]", prompt)
    }
}
