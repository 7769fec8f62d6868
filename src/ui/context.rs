use crate::ui::terminal::TerminalCapabilities;
use hoist::config::{ColorMode, Settings};
use hoist::presentation::ColorWhen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(cli_color: Option<ColorWhen>, settings: &Settings) -> Self {
        Self::from_caps(cli_color, settings, TerminalCapabilities::detect())
    }

    pub(crate) fn from_caps(
        cli_color: Option<ColorWhen>,
        settings: &Settings,
        caps: TerminalCapabilities,
    ) -> Self {
        // the flag wins over the settings file, which wins over detection
        let mode = cli_color.map(ColorMode::from).unwrap_or(settings.output.color);
        let color = match mode {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => caps.supports_color && !caps.is_ci,
        };

        Self {
            caps,
            color,
            unicode: caps.supports_unicode,
        }
    }
}
