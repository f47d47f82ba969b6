//! Append-only session log written next to the application being updated.
//!
//! Every line is synced to storage before the call returns, so the log stays
//! complete even if the helper is killed right after spawning the app.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::error::{Result, UpdaterError};

pub const SESSION_STARTED: &str = "=== Updater session started ===";
pub const SESSION_ENDED: &str = "=== Updater session ended ===";

/// Local-time layout used in the bracketed prefix of each line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render one log line, including the trailing newline.
pub fn format_line(timestamp: &str, level: LogLevel, message: &str) -> String {
    format!("[{timestamp}] {level}: {message}\n")
}

/// File-backed logger for one updater run.
///
/// Writes the start marker on `init` and the end marker on `close`. Dropping
/// the logger closes it, so the end marker is written on every exit path.
#[derive(Debug)]
pub struct SessionLogger {
    file: Option<File>,
}

impl SessionLogger {
    /// Open (or create) `log_path` for appending and write the start marker.
    ///
    /// Missing parent directories are created.
    pub fn init(log_path: impl AsRef<Path>) -> Result<Self> {
        let log_path = log_path.as_ref();
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_log_dir(parent).map_err(|e| {
                UpdaterError::Io(format!("failed to create log directory: {e}"))
            })?;
        }
        let file = open_append(log_path)
            .map_err(|e| UpdaterError::Io(format!("failed to open log file: {e}")))?;

        tracing::debug!(path = %log_path.display(), "session log opened");
        let mut logger = Self { file: Some(file) };
        logger.info(SESSION_STARTED);
        Ok(logger)
    }

    /// A logger with no backing file. Every call is a no-op.
    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    pub fn info(&mut self, message: &str) {
        self.write_line(LogLevel::Info, message);
    }

    pub fn error(&mut self, message: &str) {
        self.write_line(LogLevel::Error, message);
    }

    /// Write the end marker and release the file handle.
    ///
    /// Safe to call more than once; later calls do nothing.
    pub fn close(&mut self) -> Result<()> {
        if self.file.is_none() {
            return Ok(());
        }
        self.info(SESSION_ENDED);
        if let Some(file) = self.file.take() {
            file.sync_all()
                .map_err(|e| UpdaterError::Io(format!("failed to close log file: {e}")))?;
        }
        Ok(())
    }

    fn write_line(&mut self, level: LogLevel, message: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let line = format_line(&timestamp, level, message);
        if let Err(e) = file
            .write_all(line.as_bytes())
            .and_then(|()| file.sync_all())
        {
            tracing::warn!(error = %e, %level, "failed to write session log line");
        }
    }
}

impl Drop for SessionLogger {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "session log close failed");
        }
    }
}

#[cfg(unix)]
fn create_log_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o755)
        .create(dir)
}

#[cfg(not(unix))]
fn create_log_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}

fn open_append(path: &Path) -> std::io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }
    opts.open(path)
}
