use std::str::FromStr;

use tracing::Level;

use crate::error::{ConfigError, InvalidLogFormatSnafu, InvalidLogLevelSnafu};

pub const SERVICE_NAME: &str = "POWERTOOLS_SERVICE_NAME";
pub const LOG_LEVEL: &str = "LOG_LEVEL";
pub const LOG_FORMAT: &str = "LOG_FORMAT";
pub const TRACING_DEBUG: &str = "TRACING_DEBUG";

pub const DEFAULT_SERVICE_NAME: &str = "cross-otlp-logger";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub service_name: String,
    pub log_level: Level,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_name = lookup(SERVICE_NAME)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        let log_level = if lookup(TRACING_DEBUG).is_some() {
            Level::DEBUG
        } else {
            match lookup(LOG_LEVEL) {
                Some(value) => Level::from_str(&value).map_err(|_| {
                    InvalidLogLevelSnafu {
                        variable: LOG_LEVEL,
                        value: value.as_str(),
                    }
                    .build()
                })?,
                None => Level::INFO,
            }
        };

        let log_format = match lookup(LOG_FORMAT) {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "text" => LogFormat::Text,
                _ => {
                    return InvalidLogFormatSnafu {
                        variable: LOG_FORMAT,
                        value,
                    }
                    .fail()
                }
            },
            None => LogFormat::Json,
        };

        Ok(Config {
            service_name,
            log_level,
            log_format,
        })
    }
}
