//! Runtime configuration
//!
//! Configuration is environment-based: the one mandatory value is the
//! `Api-User-Agent` header Wikipedia asks API consumers to send, the rest
//! are optional overrides for the outbound HTTP policy.
//!
//! # Example
//!
//! ```no_run
//! use wikifold::config::Config;
//!
//! std::env::set_var("WIKIFOLD_API_USER_AGENT", "my-viewer/1.0 (ops@example.com)");
//! let config = Config::from_env().unwrap();
//! assert_eq!(config.max_retries, 2);
//! ```

use crate::{ConfigError, ConfigResult};
use serde::Deserialize;
use std::time::Duration;

/// Environment variable holding the `Api-User-Agent` header value
pub const ENV_API_USER_AGENT: &str = "WIKIFOLD_API_USER_AGENT";

/// Optional numeric overrides
pub const ENV_TIMEOUT_SECS: &str = "WIKIFOLD_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT_SECS: &str = "WIKIFOLD_CONNECT_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "WIKIFOLD_MAX_RETRIES";
pub const ENV_RETRY_DELAY_MS: &str = "WIKIFOLD_RETRY_DELAY_MS";

/// Optional fixed origin for all outbound requests (mirrors, test servers)
pub const ENV_ORIGIN: &str = "WIKIFOLD_ORIGIN";

/// Main configuration structure for wikifold
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Value of the `Api-User-Agent` header sent with every request
    pub api_user_agent: String,

    /// Overall per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Retries after a transient failure (5xx, timeout, refused connection)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between retries in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// When set, every request goes to this origin instead of
    /// `https://<language>.wikipedia.org`. Rewritten links in the adapted
    /// HTML still point at the real Wikipedia origin.
    #[serde(default)]
    pub origin_override: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_user_agent: format!(
                "wikifold/{} (https://github.com/wikifold/wikifold)",
                env!("CARGO_PKG_VERSION")
            ),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            origin_override: None,
        }
    }
}

impl Config {
    /// Loads configuration from the environment
    ///
    /// `WIKIFOLD_API_USER_AGENT` is required; the remaining variables fall
    /// back to the documented defaults. The resulting configuration is
    /// validated before being returned.
    pub fn from_env() -> ConfigResult<Self> {
        let api_user_agent = std::env::var(ENV_API_USER_AGENT)
            .map_err(|_| ConfigError::MissingEnv(ENV_API_USER_AGENT))?;

        let config = Config {
            api_user_agent,
            timeout_secs: read_env_number(ENV_TIMEOUT_SECS, default_timeout_secs())?,
            connect_timeout_secs: read_env_number(
                ENV_CONNECT_TIMEOUT_SECS,
                default_connect_timeout_secs(),
            )?,
            max_retries: read_env_number(ENV_MAX_RETRIES, default_max_retries())?,
            retry_delay_ms: read_env_number(ENV_RETRY_DELAY_MS, default_retry_delay_ms())?,
            origin_override: std::env::var(ENV_ORIGIN).ok().filter(|s| !s.is_empty()),
        };

        validate(&config)?;
        Ok(config)
    }

    /// Per-request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connection timeout as a [`Duration`]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Delay between retries as a [`Duration`]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn read_env_number<T: std::str::FromStr>(name: &'static str, fallback: T) -> ConfigResult<T> {
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            name,
            message: format!("expected a number, got '{}'", raw),
        }),
        Err(_) => Ok(fallback),
    }
}

/// Validates the configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    if config.api_user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "api_user_agent cannot be empty".to_string(),
        ));
    }

    // Header values must stay within the visible-ASCII range
    if !config
        .api_user_agent
        .chars()
        .all(|c| (' '..='~').contains(&c))
    {
        return Err(ConfigError::Validation(format!(
            "api_user_agent must be printable ASCII, got '{}'",
            config.api_user_agent
        )));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    if let Some(origin) = &config.origin_override {
        url::Url::parse(origin).map_err(|e| {
            ConfigError::Validation(format!("origin_override is not a valid URL: {}", e))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            api_user_agent: "test-viewer/1.0 (test@example.com)".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let config = Config {
            api_user_agent: "   ".to_string(),
            ..base_config()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_non_ascii_user_agent_rejected() {
        let config = Config {
            api_user_agent: "katselunäkymä/1.0".to_string(),
            ..base_config()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            timeout_secs: 0,
            ..base_config()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_excessive_retries_rejected() {
        let config = Config {
            max_retries: 11,
            ..base_config()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_origin_override_rejected() {
        let config = Config {
            origin_override: Some("not a url".to_string()),
            ..base_config()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_durations() {
        let config = base_config();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert_eq!(config.retry_delay(), Duration::from_millis(500));
    }
}
