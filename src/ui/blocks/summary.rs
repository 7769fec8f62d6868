use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::r#box::{Box, BoxStyle};

/// Closing block of a successful run: a title and aligned `label  value` rows
#[derive(Debug, Clone)]
pub struct ResultSummary {
    title: String,
    icon: Icon,
    fields: Vec<(String, String)>,
    notes: Vec<String>,
    next_step: Option<String>,
}

impl ResultSummary {
    pub fn success(icon: Icon, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon,
            fields: Vec::new(),
            notes: Vec::new(),
            next_step: None,
        }
    }

    pub fn add_field(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.fields.push((label.into(), value.into()));
    }

    /// Add an informational message (shown with success icon)
    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }

    pub fn with_next_step(&mut self, hint: impl Into<String>) {
        self.next_step = Some(hint.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool, width: u16) -> String {
        let title = ColoredText::success(self.title.as_str())
            .bold()
            .render(supports_color);
        let header = format!(
            "{} {}",
            self.icon.colored(supports_color, supports_unicode),
            title
        );

        let mut b = Box::with_title(header)
            .style(BoxStyle::Success)
            .max_width(width);
        b.add_empty();

        let label_width = self.fields.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (label, value) in &self.fields {
            let label = format!("{:<width$}", label, width = label_width);
            b.add_line(format!(
                "{}  {}",
                ColoredText::dim(label).render(supports_color),
                value
            ));
        }

        if !self.notes.is_empty() {
            b.add_empty();
            for note in &self.notes {
                b.add_line(format!(
                    "{} {}",
                    Icon::Success.colored(supports_color, supports_unicode),
                    note
                ));
            }
        }

        if let Some(next_step) = &self.next_step {
            b.add_empty();
            b.add_line(format!(
                "{} {} {}",
                Icon::Arrow.colored(supports_color, supports_unicode),
                ColoredText::dim("Next:").render(supports_color),
                next_step
            ));
        }

        b.render(supports_color, supports_unicode)
    }
}
