// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use log::{Level, Log, Metadata, Record, SetLoggerError};

/// Builds and installs the process-wide logger. Messages go to stderr so
/// that stdout only carries the run summary.
pub struct Logger {
    label: &'static str,
    level: Level,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Logger {
        Logger {
            label: "",
            level: Level::Info,
        }
    }

    /// shown in place of the record target below debug level
    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn init(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self)).map(|()| log::set_max_level(level.to_level_filter()))
    }

    fn target<'a>(&'a self, record: &'a Record) -> &'a str {
        if record.level() >= Level::Debug || self.label.is_empty() {
            record.target()
        } else {
            self.label
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{} {:<5} [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                self.target(record),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}
