//! Structured logging to a file.
//!
//! The terminal belongs to the UI while a session is on screen, so events are
//! written to `<state dir>/minitype.log` instead of stderr. `MINITYPE_LOG`
//! takes precedence over the configured level and accepts any `EnvFilter`
//! directive (`minitype=debug`, `trace`, ...).

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app_dirs::AppDirs;
use crate::error::{Error, Result};

pub const LOG_ENV: &str = "MINITYPE_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
            path: AppDirs::log_path(),
        }
    }
}

impl LoggingConfig {
    /// Directive used when `MINITYPE_LOG` is unset or invalid.
    fn default_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(format!("minitype={}", self.level))
            .map_err(|e| Error::Logging(e.to_string()))
    }

    pub fn filter(&self) -> Result<EnvFilter> {
        match EnvFilter::try_from_env(LOG_ENV) {
            Ok(filter) => Ok(filter),
            Err(_) => self.default_filter(),
        }
    }

    /// Install the global subscriber. Fails if one is already set.
    pub fn init(&self) -> Result<()> {
        let filter = self.filter()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let writer = Mutex::new(file);

        let installed = match self.format {
            LogFormat::Text => tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true),
                )
                .try_init(),
            LogFormat::Json => tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(writer))
                .try_init(),
        };
        installed.map_err(|e| Error::Logging(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_log_format_parses_from_cli_values() {
        assert_eq!(LogFormat::from_str("json", true), Ok(LogFormat::Json));
        assert_eq!(LogFormat::from_str("TEXT", true), Ok(LogFormat::Text));
        assert!(LogFormat::from_str("xml", true).is_err());
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_default_config_is_warn_text() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Text);
        assert!(config.path.ends_with("minitype.log"));
    }

    #[test]
    fn test_level_becomes_crate_directive() {
        let config = LoggingConfig {
            level: "debug".into(),
            ..LoggingConfig::default()
        };
        let filter = config.default_filter().unwrap();
        assert_eq!(filter.to_string(), "minitype=debug");
    }

    #[test]
    fn test_bad_level_is_a_logging_error() {
        let config = LoggingConfig {
            level: "loud".into(),
            ..LoggingConfig::default()
        };
        assert_matches!(config.default_filter(), Err(Error::Logging(_)));
    }
}
