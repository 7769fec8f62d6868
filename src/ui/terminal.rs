//! What the attached terminal can show.
//!
//! Deploy runs often happen from CI jobs, over `ssh -t`, or piped into a
//! file, so detection is conservative: color needs a tty, and unicode glyphs
//! are dropped for C/POSIX locales.

use is_terminal::IsTerminal;

const DEFAULT_WIDTH: u16 = 80;

const CI_MARKERS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "JENKINS_HOME",
    "BUILDKITE",
    "CIRCLECI",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub is_ci: bool,
    pub width: u16,
}

impl TerminalCapabilities {
    /// Probe the real process environment and stdout
    pub fn detect() -> Self {
        Self::from_env(
            |key| std::env::var(key).ok(),
            std::io::stdout().is_terminal(),
            crossterm::terminal::size().ok().map(|(cols, _)| cols),
        )
    }

    fn from_env(
        var: impl Fn(&str) -> Option<String>,
        is_tty: bool,
        columns: Option<u16>,
    ) -> Self {
        let dumb = var("TERM").is_some_and(|t| t.eq_ignore_ascii_case("dumb"));

        Self {
            supports_color: is_tty && !dumb && var("NO_COLOR").is_none(),
            supports_unicode: !dumb && locale_is_unicode(&var),
            is_ci: CI_MARKERS.iter().any(|k| var(k).is_some()),
            width: columns.filter(|c| *c > 0).unwrap_or(DEFAULT_WIDTH),
        }
    }
}

/// The first locale variable that is set decides; unset means unicode
fn locale_is_unicode(var: &impl Fn(&str) -> Option<String>) -> bool {
    let Some(locale) = ["LC_ALL", "LC_CTYPE", "LANG"]
        .into_iter()
        .filter_map(|k| var(k))
        .find(|v| !v.is_empty())
    else {
        return true;
    };

    let locale = locale.to_ascii_lowercase();
    if locale.contains("utf-8") || locale.contains("utf8") {
        return true;
    }
    !matches!(locale.as_str(), "c" | "posix")
}
