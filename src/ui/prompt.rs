//! Terminal prompts

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dialoguer::{Confirm, Input, Password};
use hoist::domain::ports::Prompter;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::theme::HoistTheme;

/// `Prompter` backed by dialoguer.
///
/// Ctrl-C while a prompt owns the terminal arrives as a key, not a signal, so
/// an interrupted read raises the shared interrupt flag itself.
pub struct DialoguerPrompter {
    ui: UiContext,
    theme: HoistTheme,
    interrupted: Arc<AtomicBool>,
}

impl DialoguerPrompter {
    pub fn new(ui: UiContext, interrupted: Arc<AtomicBool>) -> Self {
        Self {
            ui,
            theme: HoistTheme::new(ui.color),
            interrupted,
        }
    }

    fn check<T>(&self, result: Result<T, dialoguer::Error>) -> io::Result<T> {
        result.map_err(|err| {
            let err = io::Error::from(err);
            if err.kind() == io::ErrorKind::Interrupted {
                self.interrupted.store(true, Ordering::SeqCst);
            }
            err
        })
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(prompt);
        input = match default {
            Some(default) => input.default(default.to_string()),
            // an empty answer reaches the validator, which explains what is missing
            None => input.allow_empty(true),
        };
        self.check(input.interact_text())
    }

    fn secret(&self, prompt: &str) -> io::Result<String> {
        self.check(
            Password::with_theme(&self.theme)
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact(),
        )
    }

    fn confirm(&self, prompt: &str, default: bool) -> io::Result<bool> {
        self.check(
            Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default)
                .interact(),
        )
    }

    fn notice(&self, message: &str) {
        let icon = Icon::Arrow.colored(self.ui.color, self.ui.unicode);
        let mut lines = message.lines();
        if let Some(first) = lines.next() {
            println!("{} {}", icon, first);
        }
        for line in lines {
            println!("  {}", line);
        }
    }
}
