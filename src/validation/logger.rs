/*!
 * Logging collaborator handed to every validator.
 *
 * Validators report through a `ValidationLogger` they receive at
 * construction instead of the global `log` facade, so a run can be
 * mirrored into a file and tests can observe (or break) logging.
 * Callers ignore the returned errors.
 */

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use log::Level;

use crate::file_utils::FileManager;

/// Sink for validator log lines
pub trait ValidationLogger: Send + Sync {
    fn log(&self, level: Level, message: &str) -> Result<()>;
}

/// Forwards to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleLogger;

impl ValidationLogger for ConsoleLogger {
    fn log(&self, level: Level, message: &str) -> Result<()> {
        log::log!(level, "{}", message);
        Ok(())
    }
}

/// Appends timestamped lines to a log file
#[derive(Debug, Clone)]
pub struct FileLogger {
    path: PathBuf,
    min_level: Level,
}

impl FileLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            min_level: Level::Debug,
        }
    }

    /// Only write lines at or above `level`
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }
}

impl ValidationLogger for FileLogger {
    fn log(&self, level: Level, message: &str) -> Result<()> {
        if level > self.min_level {
            return Ok(());
        }
        FileManager::append_to_log_file(&self.path, &format!("{:<5} {}", level, message))
    }
}

/// Fans a line out to several loggers
///
/// Every logger is tried; the first failure is returned afterwards.
#[derive(Clone, Default)]
pub struct TeeLogger {
    loggers: Vec<Arc<dyn ValidationLogger>>,
}

impl TeeLogger {
    pub fn new(loggers: Vec<Arc<dyn ValidationLogger>>) -> Self {
        Self { loggers }
    }
}

impl ValidationLogger for TeeLogger {
    fn log(&self, level: Level, message: &str) -> Result<()> {
        let mut first_error = None;
        for logger in &self.loggers {
            if let Err(e) = logger.log(level, message) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl ValidationLogger for NullLogger {
    fn log(&self, _level: Level, _message: &str) -> Result<()> {
        Ok(())
    }
}
