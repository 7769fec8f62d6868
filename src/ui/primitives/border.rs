use crate::ui::theme;

/// The six glyphs a box is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
}

impl BorderSet {
    pub fn for_terminal(supports_unicode: bool) -> Self {
        let [top_left, top_right, bottom_left, bottom_right, horizontal, vertical] =
            if supports_unicode {
                theme::ROUNDED_FRAME
            } else {
                theme::ASCII_FRAME
            };
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            horizontal,
            vertical,
        }
    }

    /// A horizontal rule `width` glyphs long
    pub fn rule(&self, width: usize) -> String {
        self.horizontal.repeat(width)
    }
}
