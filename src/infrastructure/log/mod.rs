//! Operator Log Sinks
//!
//! - `FileLog`: the timestamped run log file
//! - `TeeLog`: fan-out to several sinks
//! - `RedactingLog`: scrubs registered secrets before anything is written

mod file;
mod redact;
mod tee;

pub use file::{log_file_name, FileLog};
pub use redact::{Redactor, RedactingLog};
pub use tee::TeeLog;
