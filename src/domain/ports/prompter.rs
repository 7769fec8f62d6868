//! Prompter Port
//!
//! Operator interaction used by input collection. The terminal
//! implementation lives in the binary; tests script answers.

use std::io;

pub trait Prompter {
    /// Ask for a line of text, offering `default` when the operator just presses enter
    fn input(&self, prompt: &str, default: Option<&str>) -> io::Result<String>;

    /// Ask for a secret with terminal echo disabled
    fn secret(&self, prompt: &str) -> io::Result<String>;

    /// Yes/no question
    fn confirm(&self, prompt: &str, default: bool) -> io::Result<bool>;

    /// Show a message (validation feedback, summaries)
    fn notice(&self, message: &str);
}
