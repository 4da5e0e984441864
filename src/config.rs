//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend REST service.
    pub base_url: String,
    /// Directory holding the persisted session (token + cached profile).
    pub data_dir: PathBuf,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// How long a step's success message is shown before advancing.
    pub advance_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            data_dir: PathBuf::from("./data"),
            request_timeout: Duration::from_secs(30),
            advance_delay: Duration::from_millis(1500),
        }
    }
}

impl ClientConfig {
    /// Build a config from `MOTO_ONBOARD_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("MOTO_ONBOARD_API_URL") {
            config.base_url = url;
        }
        if let Ok(dir) = std::env::var("MOTO_ONBOARD_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(secs) = std::env::var("MOTO_ONBOARD_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(parse_number("MOTO_ONBOARD_TIMEOUT_SECS", &secs)?);
        }
        if let Ok(ms) = std::env::var("MOTO_ONBOARD_ADVANCE_DELAY_MS") {
            config.advance_delay =
                Duration::from_millis(parse_number("MOTO_ONBOARD_ADVANCE_DELAY_MS", &ms)?);
        }

        Ok(config)
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("not a number: {raw}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.advance_delay, Duration::from_millis(1500));
    }

    #[test]
    fn parse_number_accepts_digits_only() {
        assert_eq!(parse_number("MOTO_ONBOARD_ADVANCE_DELAY_MS", "250").unwrap(), 250);

        let err = parse_number("MOTO_ONBOARD_ADVANCE_DELAY_MS", "fast").unwrap_err();
        assert!(err.to_string().contains("MOTO_ONBOARD_ADVANCE_DELAY_MS"));
    }
}
