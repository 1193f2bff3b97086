//! Logging setup
//!
//! Installs a [`log`] backend that writes `[LEVEL target] message` lines to
//! stderr and, optionally, to a log file.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Log levels, from quietest to noisiest
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Nothing = 0,
    User = 1,
    Error = 2,
    Warning = 3,
    #[default]
    Info = 4,
    Debug = 5,
    All = 6,
}

impl LogLevel {
    /// Create a LogLevel from an integer; unknown values give Info
    pub fn from_i32(level: i32) -> Self {
        match level {
            0 => LogLevel::Nothing,
            1 => LogLevel::User,
            2 => LogLevel::Error,
            3 => LogLevel::Warning,
            4 => LogLevel::Info,
            5 => LogLevel::Debug,
            6 => LogLevel::All,
            _ => LogLevel::Info,
        }
    }

    /// Matching filter for the `log` facade
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Nothing => log::LevelFilter::Off,
            LogLevel::User | LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::All => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    /// Accepts a level name (`info`, `warn`, ...) or a number 0-6
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i32>() {
            return Ok(LogLevel::from_i32(n));
        }
        match s.to_lowercase().as_str() {
            "nothing" | "off" | "none" => Ok(LogLevel::Nothing),
            "user" => Ok(LogLevel::User),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "all" | "trace" => Ok(LogLevel::All),
            _ => anyhow::bail!(
                "Invalid log level: {}. Valid options: nothing, user, error, warning, info, debug, all",
                s
            ),
        }
    }
}

struct RobotLogger {
    file: Mutex<Option<(PathBuf, File)>>,
}

static LOGGER: RobotLogger = RobotLogger {
    file: Mutex::new(None),
};

impl log::Log for RobotLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{} {}] {}", record.level(), record.target(), record.args());
        eprintln!("{}", line);

        let mut guard = self.file.lock();
        if let Some((_, ref mut file)) = *guard {
            let _ = writeln!(file, "{}", line);
        }
    }

    fn flush(&self) {
        let mut guard = self.file.lock();
        if let Some((_, ref mut file)) = *guard {
            let _ = file.flush();
        }
    }
}

/// Install the logger (first call) and set the level and log file.
///
/// Safe to call again; later calls replace the level and the file.
pub fn init_logging(level: LogLevel, log_file: Option<&Path>) -> Result<()> {
    let file = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Some((path.to_path_buf(), file))
        }
        None => None,
    };

    *LOGGER.file.lock() = file;

    // Already installed by an earlier call
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level.to_filter());

    Ok(())
}

/// Path of the current log file, if any
pub fn log_file_path() -> Option<PathBuf> {
    LOGGER.file.lock().as_ref().map(|(path, _)| path.clone())
}
