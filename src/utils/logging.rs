// Logging utilities
// Author: Gabriel Demetrios Lafis

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Metadata, Record};

use super::{AppError, AppResult};

/// Initialize logging with the given level, optionally mirroring to a file
pub fn init_logging(level: LevelFilter, file: Option<&Path>) -> AppResult<()> {
    let file = match file {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };

    log::set_boxed_logger(Box::new(SimpleLogger {
        level,
        file: Mutex::new(file),
    }))
    .map_err(|e| AppError::Config(e.to_string()))?;

    log::set_max_level(level);
    Ok(())
}

/// Timestamped logger writing to stderr and an optional file
struct SimpleLogger {
    level: LevelFilter,
    file: Mutex<Option<File>>,
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let level_str = match record.level() {
            Level::Error => "\x1B[31mERROR\x1B[0m",
            Level::Warn => "\x1B[33mWARN\x1B[0m",
            Level::Info => "\x1B[32mINFO\x1B[0m",
            Level::Debug => "\x1B[34mDEBUG\x1B[0m",
            Level::Trace => "\x1B[90mTRACE\x1B[0m",
        };

        eprintln!("[{}] {}: {}", timestamp, level_str, record.args());

        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = writeln!(
                    file,
                    "[{}] {} {}: {}",
                    timestamp,
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}
