// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

pub const BASE_URL_VAR: &str = "SENSOR_CHARTS_BASE_URL";
pub const POLL_SECS_VAR: &str = "SENSOR_CHARTS_POLL_SECS";
pub const TIMEOUT_SECS_VAR: &str = "SENSOR_CHARTS_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidSeconds { var: &'static str, value: String },
}

/// Where the dashboard finds its telematics proxy and how often it polls.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base address of the local telematics proxy.
    pub base_url: String,

    /// Seconds between live refreshes. Absent or `0` fetches once.
    pub poll_interval_secs: Option<u64>,

    /// Per-request timeout in seconds. Absent waits forever.
    pub request_timeout_secs: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_secs: None,
            request_timeout_secs: None,
        }
    }
}

impl DashboardConfig {
    /// `config.json` in the platform's config directory, e.g.
    /// `~/.config/sensor-charts/config.json` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "sensor-charts")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Defaults, overlaid by the config file (if there is one) and then by the
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str::<Self>(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Applies overrides from environment variables, looked up through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(base_url) = lookup(BASE_URL_VAR) {
            self.base_url = base_url;
        }
        if let Some(value) = lookup(POLL_SECS_VAR) {
            self.poll_interval_secs = Some(parse_seconds(POLL_SECS_VAR, value)?);
        }
        if let Some(value) = lookup(TIMEOUT_SECS_VAR) {
            self.request_timeout_secs = Some(parse_seconds(TIMEOUT_SECS_VAR, value)?);
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Option<Duration> {
        self.poll_interval_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

fn parse_seconds(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSeconds { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn defaults_fetch_once_from_localhost() {
        let config = DashboardConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.poll_interval(), None);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn environment_overrides_defaults() {
        let mut config = DashboardConfig::default();
        config
            .apply_env(env(&[
                (BASE_URL_VAR, "http://10.0.0.5:3001"),
                (POLL_SECS_VAR, " 300 "),
                (TIMEOUT_SECS_VAR, "10"),
            ]))
            .unwrap();

        assert_eq!(config.base_url, "http://10.0.0.5:3001");
        assert_eq!(config.poll_interval(), Some(Duration::from_secs(300)));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn zero_seconds_disables_polling() {
        let mut config = DashboardConfig::default();
        config.apply_env(env(&[(POLL_SECS_VAR, "0")])).unwrap();
        assert_eq!(config.poll_interval_secs, Some(0));
        assert_eq!(config.poll_interval(), None);
    }

    #[test]
    fn invalid_seconds_are_rejected() {
        let mut config = DashboardConfig::default();
        let err = config
            .apply_env(env(&[(POLL_SECS_VAR, "five minutes")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeconds { var: POLL_SECS_VAR, .. }));
        assert!(err.to_string().contains("five minutes"));
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let path = std::env::temp_dir().join(format!("sensor-charts-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "poll_interval_secs": 60 }"#).unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn missing_config_file_is_a_read_error() {
        let path = Path::new("/nonexistent/sensor-charts/config.json");
        assert!(matches!(
            DashboardConfig::from_file(path),
            Err(ConfigError::Read { .. })
        ));
    }
}
