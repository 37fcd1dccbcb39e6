use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub serial: SerialSettings,
    pub tracker: TrackerSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerialSettings {
    pub port: String,
    pub baud: u32,
    /// Upper bound on one blocking read; also the reader's cancellation poll
    /// interval.
    #[serde(deserialize_with = "duration")]
    pub read_timeout: Duration,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_string(),
            baud: 9_600,
            read_timeout: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerSettings {
    /// Upper bound on one blocking receive from the telemetry hand-off.
    #[serde(deserialize_with = "duration")]
    pub recv_timeout: Duration,
    /// Full width of the rate-estimation window.
    #[serde(deserialize_with = "duration")]
    pub rate_window: Duration,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            recv_timeout: Duration::from_secs(2),
            rate_window: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySettings {
    /// Emit JSON readouts on stdout instead of log lines.
    pub json: bool,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            None => Self::default(),
            Some(path) => {
                let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                serde_yaml::from_str(&yaml)?
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.serial.read_timeout.is_zero() {
            return Err(ConfigError::Invalid("serial.read_timeout must be > 0".into()));
        }
        if self.tracker.recv_timeout.is_zero() {
            return Err(ConfigError::Invalid("tracker.recv_timeout must be > 0".into()));
        }
        if self.tracker.rate_window.is_zero() {
            return Err(ConfigError::Invalid("tracker.rate_window must be > 0".into()));
        }
        Ok(())
    }
}

/// Durations are written in humantime notation (`500ms`, `2s`, `1m`).
fn duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    humantime::parse_duration(text.trim()).map_err(serde::de::Error::custom)
}
