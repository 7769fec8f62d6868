use unicode_width::UnicodeWidthStr;

use crate::ui::primitives::border::BorderSet;
use crossterm::style::{Color, Stylize};

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxStyle {
    #[default]
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Box {
    title: Option<String>,
    content: Vec<String>,
    max_width: Option<usize>,
    style: BoxStyle,
}

impl Box {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    /// Wrap content so the box, borders included, fits in `columns`
    pub fn max_width(mut self, columns: u16) -> Self {
        self.max_width = Some(columns as usize);
        self
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        for part in line.lines() {
            self.content.push(part.to_string());
        }
    }

    pub fn add_empty(&mut self) {
        self.content.push(String::new());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let rows: Vec<String> = self
            .title
            .iter()
            .cloned()
            .chain(self.content.iter().flat_map(|line| match self.max_width {
                // 4 columns go to borders and padding
                Some(max) if max > 12 => wrap(line, max - 4),
                _ => vec![line.clone()],
            }))
            .collect();

        // one space of padding either side
        let inner = rows.iter().map(|r| visible_width(r)).max().unwrap_or(0) + 2;
        let frame = BorderSet::for_terminal(supports_unicode);
        let paint = |s: &str| {
            if supports_color {
                s.with(self.style.tint()).to_string()
            } else {
                s.to_string()
            }
        };

        let mut out = paint(&format!("{}{}{}", frame.top_left, frame.rule(inner), frame.top_right));
        out.push('\n');
        for row in &rows {
            let pad = inner - 1 - visible_width(row);
            let edge = paint(frame.vertical);
            out.push_str(&format!("{edge} {row}{}{edge}\n", " ".repeat(pad)));
        }
        out.push_str(&paint(&format!(
            "{}{}{}",
            frame.bottom_left,
            frame.rule(inner),
            frame.bottom_right
        )));
        out.push('\n');
        out
    }
}

impl BoxStyle {
    fn tint(self) -> Color {
        match self {
            BoxStyle::Info => theme::colors::INFO,
            BoxStyle::Success => theme::colors::SUCCESS,
            BoxStyle::Error => theme::colors::ERROR,
        }
    }
}

/// Break plain text into rows no wider than `width`; styled lines are kept whole
fn wrap(line: &str, width: usize) -> Vec<String> {
    if line.contains('\u{1b}') || line.width() <= width {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    for ch in line.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current.width() + ch_width > width {
            rows.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    if !s.contains('\u{1b}') {
        return std::borrow::Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // ESC [ ... <final letter>
            if matches!(chars.peek(), Some('[') | Some(']')) {
                let _ = chars.next();
            }
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }

    std::borrow::Cow::Owned(out)
}
