//! Tracing subscriber setup for the CLI.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    None,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
            LogLevel::None => "off",
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::None => LevelFilter::OFF,
        }
    }
}

/// Build the filter: `RUST_LOG` wins when set, otherwise the requested level.
pub fn build_filter(level: LogLevel) -> EnvFilter {
    if level == LogLevel::None {
        return EnvFilter::new(level.to_filter_directive());
    }
    EnvFilter::builder()
        .with_default_directive(level.level_filter().into())
        .from_env_lossy()
}

/// Install the global subscriber. Logs go to stderr unless `quiet`, and are
/// also appended to `log_file` when given. Program output stays on stdout.
pub fn init(level: LogLevel, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let console = (!quiet).then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    let file = match log_file {
        Some(path) => {
            let handle = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(handle)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(console)
        .with(file)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_maps_to_off() {
        assert_eq!(LogLevel::None.to_filter_directive(), "off");
        assert_eq!(LogLevel::None.level_filter(), LevelFilter::OFF);
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn levels_deserialize_lowercase() -> Result<()> {
        let level: LogLevel = serde_yaml_ng::from_str("debug")?;
        assert_eq!(level, LogLevel::Debug);
        Ok(())
    }
}
