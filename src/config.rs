use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_TOKEN_PATH: &str = ".exchange_token";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to
    pub api_base_url: String,

    /// Fixed timeout applied to each request
    pub request_timeout: Duration,

    /// Interval between polls of the pending approvals
    pub poll_interval: Duration,

    /// File holding the bearer token
    pub token_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    api_base_url: String,
    request_timeout_secs: u64,
    poll_interval_secs: u64,
    token_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
        }
    }
}

impl ClientConfig {
    /// Reads `EXCHANGE_*` environment variables on top of the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix("EXCHANGE"))
    }

    fn load(source: Environment) -> Result<Self, ConfigError> {
        let raw: RawConfig = Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .set_default("poll_interval_secs", DEFAULT_POLL_INTERVAL_SECS as i64)?
            .set_default("token_path", DEFAULT_TOKEN_PATH)?
            .add_source(source.try_parsing(true))
            .build()?
            .try_deserialize()?;

        if raw.request_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if raw.poll_interval_secs == 0 {
            return Err(ConfigError::Message(
                "poll_interval_secs must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            api_base_url: raw.api_base_url,
            request_timeout: Duration::from_secs(raw.request_timeout_secs),
            poll_interval: Duration::from_secs(raw.poll_interval_secs),
            token_path: PathBuf::from(raw.token_path),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("EXCHANGE").source(Some(map))
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = ClientConfig::load(env(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.token_path, PathBuf::from(DEFAULT_TOKEN_PATH));
    }

    #[test]
    fn variables_override_defaults() {
        let config = ClientConfig::load(env(&[
            ("EXCHANGE_API_BASE_URL", "https://api.example.com"),
            ("EXCHANGE_POLL_INTERVAL_SECS", "10"),
            ("EXCHANGE_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(ClientConfig::load(env(&[("EXCHANGE_POLL_INTERVAL_SECS", "0")])).is_err());
    }
}
