//! Minimal stderr backend for the `log` facade.
//!
//! Stdout carries protocol lines only, so every record goes to stderr.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Writes `LEVEL target: message` lines to stderr.
#[derive(Debug)]
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    #[must_use]
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        let mut stderr = std::io::stderr().lock();
        // Nowhere left to report a failed log write.
        let _ = writeln!(stderr, "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install [`StderrLogger`] as the global logger.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}

fn format_record(record: &Record<'_>) -> String {
    format!("{:<5} {}: {}", record.level(), record.target(), record.args())
}
