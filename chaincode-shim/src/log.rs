// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The logging capability handed to each chaincode instance.
//!
//! A [`ChaincodeLogger`] is owned by the chaincode that reports through it, so two
//! chaincodes in the same process never share a level or a destination. Records are written
//! to a [`LogSink`]; by default the sink is [`LogFacade`], which forwards them to the
//! [`log`] crate with the logger name as target.

use std::{
    fmt,
    str::FromStr,
    sync::{
        atomic::{AtomicU8, Ordering},
        Arc,
    },
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The severity of a log record, from most to least severe.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// The chaincode cannot serve the request at all.
    Critical = 0,
    /// An operation failed.
    Error = 1,
    /// Something unexpected that did not fail the operation.
    Warning = 2,
    /// A significant but normal condition.
    Notice = 3,
    /// Progress of normal operation.
    Info = 4,
    /// Detailed diagnostics.
    Debug = 5,
}

impl LogLevel {
    /// All levels, from most to least severe.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Notice,
        LogLevel::Info,
        LogLevel::Debug,
    ];

    /// Returns the upper-case name of the level.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Critical => "CRITICAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Notice => "NOTICE",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Returns the [`log::Level`] used when forwarding records to the [`log`] crate.
    pub fn to_log_level(self) -> ::log::Level {
        match self {
            LogLevel::Critical | LogLevel::Error => ::log::Level::Error,
            LogLevel::Warning => ::log::Level::Warn,
            LogLevel::Notice | LogLevel::Info => ::log::Level::Info,
            LogLevel::Debug => ::log::Level::Debug,
        }
    }

    fn from_u8(value: u8) -> Self {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .unwrap_or(LogLevel::Debug)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A string that does not name a [`LogLevel`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("invalid log level {0:?}, expected one of critical, error, warning, notice, info, debug")]
pub struct LogLevelParseError(String);

impl FromStr for LogLevel {
    type Err = LogLevelParseError;

    fn from_str(level: &str) -> Result<Self, Self::Err> {
        match level.to_ascii_lowercase().as_str() {
            "critical" => Ok(LogLevel::Critical),
            "error" => Ok(LogLevel::Error),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "notice" => Ok(LogLevel::Notice),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(LogLevelParseError(level.to_owned())),
        }
    }
}

/// A destination for log records.
pub trait LogSink: Send + Sync {
    /// Writes one record emitted by the logger called `logger`.
    fn write(&self, logger: &str, level: LogLevel, message: fmt::Arguments<'_>);
}

/// A [`LogSink`] forwarding records to the [`log`] crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFacade;

impl LogSink for LogFacade {
    fn write(&self, logger: &str, level: LogLevel, message: fmt::Arguments<'_>) {
        if level == LogLevel::Critical {
            ::log::log!(target: logger, level.to_log_level(), "{level} {message}");
        } else {
            ::log::log!(target: logger, level.to_log_level(), "{message}");
        }
    }
}

/// A named logger with its own severity threshold.
///
/// Clones share the threshold and the sink.
#[derive(Clone)]
pub struct ChaincodeLogger {
    name: Arc<str>,
    level: Arc<AtomicU8>,
    sink: Arc<dyn LogSink>,
}

impl ChaincodeLogger {
    /// Creates a logger called `name` writing to the [`log`] crate at [`LogLevel::Info`].
    pub fn new(name: &str) -> Self {
        Self::with_sink(name, Arc::new(LogFacade))
    }

    /// Creates a logger called `name` writing to `sink` at [`LogLevel::Info`].
    pub fn with_sink(name: &str, sink: Arc<dyn LogSink>) -> Self {
        ChaincodeLogger {
            name: Arc::from(name),
            level: Arc::new(AtomicU8::new(LogLevel::Info as u8)),
            sink,
        }
    }

    /// Sets the threshold and returns the logger.
    pub fn with_level(self, level: LogLevel) -> Self {
        self.set_level(level);
        self
    }

    /// Returns the name of the logger.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the threshold below which records are dropped.
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    /// Changes the threshold.
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Returns `true` if records at `level` are written.
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        level <= self.level()
    }

    /// Writes a record at `level`.
    pub fn log(&self, level: LogLevel, message: fmt::Arguments<'_>) {
        if self.is_enabled_for(level) {
            self.sink.write(&self.name, level, message);
        }
    }

    /// Writes a record at [`LogLevel::Critical`].
    pub fn critical(&self, message: fmt::Arguments<'_>) {
        self.log(LogLevel::Critical, message);
    }

    /// Writes a record at [`LogLevel::Error`].
    pub fn error(&self, message: fmt::Arguments<'_>) {
        self.log(LogLevel::Error, message);
    }

    /// Writes a record at [`LogLevel::Warning`].
    pub fn warning(&self, message: fmt::Arguments<'_>) {
        self.log(LogLevel::Warning, message);
    }

    /// Writes a record at [`LogLevel::Notice`].
    pub fn notice(&self, message: fmt::Arguments<'_>) {
        self.log(LogLevel::Notice, message);
    }

    /// Writes a record at [`LogLevel::Info`].
    pub fn info(&self, message: fmt::Arguments<'_>) {
        self.log(LogLevel::Info, message);
    }

    /// Writes a record at [`LogLevel::Debug`].
    pub fn debug(&self, message: fmt::Arguments<'_>) {
        self.log(LogLevel::Debug, message);
    }
}

impl fmt::Debug for ChaincodeLogger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ChaincodeLogger")
            .field("name", &self.name)
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

/// Logs a message at [`LogLevel::Critical`] on a [`ChaincodeLogger`].
///
/// ```ignore
/// critical!(self.logger, "Unsupported operation: {function}");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $logger.critical(::std::format_args!($($arg)+))
    };
}

/// Logs a message at [`LogLevel::Error`] on a [`ChaincodeLogger`].
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(::std::format_args!($($arg)+))
    };
}

/// Logs a message at [`LogLevel::Warning`] on a [`ChaincodeLogger`].
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warning(::std::format_args!($($arg)+))
    };
}

/// Logs a message at [`LogLevel::Notice`] on a [`ChaincodeLogger`].
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $logger.notice(::std::format_args!($($arg)+))
    };
}

/// Logs a message at [`LogLevel::Info`] on a [`ChaincodeLogger`].
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
}

/// Logs a message at [`LogLevel::Debug`] on a [`ChaincodeLogger`].
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
}
