//! Logging initialization.
//!
//! - `json`: structured logs for log aggregation
//! - `pretty`: colorful, human-readable logs
//!
//! `RUST_LOG` takes precedence over the configured level. Logs go to stderr
//! so CLI output on stdout stays machine-readable.

use std::str::FromStr;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::error::TradewatchError;
use crate::ports::config_port::ConfigPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
    pub ansi: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            ansi: true,
        }
    }
}

impl LogSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TradewatchError> {
        let defaults = Self::default();
        let format = match config.get_string("logging", "format") {
            Some(raw) => raw.parse().map_err(|reason| TradewatchError::ConfigInvalid {
                section: "logging".into(),
                key: "format".into(),
                reason,
            })?,
            None => defaults.format,
        };

        Ok(Self {
            level: config
                .get_string("logging", "level")
                .unwrap_or(defaults.level),
            format,
            ansi: config.get_bool("logging", "ansi", defaults.ansi),
        })
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(settings: &LogSettings) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let result = match settings.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(settings.ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "logging already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn defaults_when_section_missing() {
        let config = FileConfigAdapter::from_string("[data]\ntrades_path = t.csv\n").unwrap();
        assert_eq!(LogSettings::from_config(&config).unwrap(), LogSettings::default());
    }

    #[test]
    fn reads_level_format_and_ansi() {
        let config =
            FileConfigAdapter::from_string("[logging]\nlevel = debug\nformat = JSON\nansi = no\n")
                .unwrap();
        let settings = LogSettings::from_config(&config).unwrap();
        assert_eq!(settings.level, "debug");
        assert_eq!(settings.format, LogFormat::Json);
        assert!(!settings.ansi);
    }

    #[test]
    fn unknown_format_is_invalid_config() {
        let config = FileConfigAdapter::from_string("[logging]\nformat = xml\n").unwrap();
        let err = LogSettings::from_config(&config).unwrap_err();
        assert!(matches!(err, TradewatchError::ConfigInvalid { key, .. } if key == "format"));
    }

    #[test]
    fn init_twice_does_not_panic() {
        let settings = LogSettings::default();
        init_logging(&settings);
        init_logging(&settings);
    }
}
