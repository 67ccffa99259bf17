// Copyright (c) Zefchain Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module provides unified handling for tracing subscribers within chaincode binaries.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    layer::SubscriberExt as _,
    util::SubscriberInitExt as _,
};

use crate::log::LogLevel;

/// Initializes tracing in a standard way.
///
/// Records go to the standard error, leaving the standard output to the development host.
/// The `RUST_LOG` environment variable overrides the default directive derived from
/// `shim_level`. Records emitted through the [`log`] crate are bridged into the subscriber.
pub fn init(log_name: &str, shim_level: LogLevel) {
    let mut env_filter = EnvFilter::builder()
        .with_default_directive(level_filter(shim_level).into())
        .from_env_lossy();
    if let Ok(directive) = format!("{log_name}=trace").parse() {
        // The chaincode logger applies its own threshold before records get here.
        env_filter = env_filter.add_directive(directive);
    }

    let color_output =
        !std::env::var("NO_COLOR").is_ok_and(|x| !x.is_empty()) && std::io::stderr().is_terminal();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(color_output);

    if let Err(error) = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
    {
        eprintln!("Failed to initialize tracing for {log_name}: {error}");
    }
}

/// Converts a shim level into the closest [`LevelFilter`].
pub fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Critical | LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warning => LevelFilter::WARN,
        LogLevel::Notice | LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::level_filter;
    use crate::log::LogLevel;

    #[test]
    fn notice_is_reported_as_info() {
        assert_eq!(level_filter(LogLevel::Notice), LevelFilter::INFO);
        assert_eq!(level_filter(LogLevel::Critical), LevelFilter::ERROR);
    }
}
