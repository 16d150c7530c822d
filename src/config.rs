//! Page settings, loadable from TOML.

use std::time::Duration;

use duration_str::deserialize_duration;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Tunables shared by all pages.
///
/// ```toml
/// api-base-url = "http://localhost:8000"
/// notification-timeout = "4s"
/// search-debounce = "300ms"
/// redirect-delay = "2s"
/// ```
///
/// Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub api_base_url: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub notification_timeout: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub search_debounce: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub redirect_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".into(),
            notification_timeout: Duration::from_secs(3),
            search_debounce: Duration::from_millis(300),
            redirect_delay: Duration::from_secs(2),
        }
    }
}

impl Settings {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}
