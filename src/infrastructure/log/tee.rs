use crate::domain::ports::{DeployLog, LogLevel};

/// Fan-out to several sinks, in order
#[derive(Default)]
pub struct TeeLog {
    sinks: Vec<Box<dyn DeployLog>>,
}

impl TeeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl DeployLog + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl DeployLog for TeeLog {
    fn log(&self, level: LogLevel, message: &str) {
        for sink in &self.sinks {
            sink.log(level, message);
        }
    }
}
