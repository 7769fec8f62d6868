//! Terminal UI for the hoist binary: theme, console log sink, prompts and
//! the summary and failure blocks printed at the end of a run.

pub mod blocks;
pub mod context;
pub mod log;
pub mod primitives;
pub mod prompt;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
