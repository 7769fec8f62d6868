//! Run log file: `hoist-YYYYMMDD-HHMMSS.log`, one
//! `[YYYY-MM-DD HH:MM:SS] [LEVEL] message` line per entry.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local, TimeZone};

use crate::domain::ports::{DeployLog, LogLevel};

/// File name for a run started at `started`
pub fn log_file_name<Tz: TimeZone>(started: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("hoist-{}.log", started.format("%Y%m%d-%H%M%S"))
}

pub struct FileLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileLog {
    /// Create the run log in `dir`, named after the current local time
    pub fn create(dir: &Path) -> io::Result<Self> {
        Self::create_at(dir.join(log_file_name(&Local::now())))
    }

    pub fn create_at(path: PathBuf) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One formatted log line, without the trailing newline
pub fn format_line<Tz: TimeZone>(at: &DateTime<Tz>, level: LogLevel, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("[{}] [{}] {}", at.format("%Y-%m-%d %H:%M:%S"), level, message)
}

impl DeployLog for FileLog {
    fn log(&self, level: LogLevel, message: &str) {
        let now = Local::now();
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        // multi-line messages (remote diagnostics) keep the prefix on every line
        for line in message.lines() {
            if let Err(err) = writeln!(file, "{}", format_line(&now, level, line)) {
                tracing::warn!(path = %self.path.display(), %err, "cannot write run log");
                return;
            }
        }
        let _ = file.flush();
    }
}
