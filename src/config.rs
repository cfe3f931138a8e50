//! Server configuration.
//!
//! Built once at startup from the environment (and CLI overrides in `main`),
//! then passed by value into the service. Nothing reads the environment after
//! that point.

use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, NWS_API_BASE, OPENWEATHER_API_BASE,
};
use crate::error::ConfigError;
use crate::retry::RetryPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeatherMap key. Without one the forecast tool answers with a
    /// configuration hint instead of failing.
    pub openweather_api_key: Option<String>,
    pub nws_api_base: String,
    pub openweather_api_base: String,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    /// Applied to the alerts endpoint only.
    pub retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openweather_api_key: None,
            nws_api_base: NWS_API_BASE.to_string(),
            openweather_api_base: OPENWEATHER_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    /// Loads configuration from process environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENWEATHER_API_KEY` or `openweather_api_key`: OpenWeatherMap key
    /// - `NWS_API_BASE`: alerts API base URL
    /// - `OPENWEATHER_API_BASE`: current-weather API base URL
    /// - `WEATHER_REQUEST_TIMEOUT_SECS` (default: 30)
    /// - `WEATHER_CACHE_TTL_SECS` (default: 300)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            openweather_api_key: non_empty("OPENWEATHER_API_KEY")
                .or_else(|| non_empty("openweather_api_key")),
            nws_api_base: non_empty("NWS_API_BASE").unwrap_or(defaults.nws_api_base),
            openweather_api_base: non_empty("OPENWEATHER_API_BASE")
                .unwrap_or(defaults.openweather_api_base),
            request_timeout: parse_secs(
                "WEATHER_REQUEST_TIMEOUT_SECS",
                non_empty("WEATHER_REQUEST_TIMEOUT_SECS"),
            )?
            .unwrap_or(defaults.request_timeout),
            cache_ttl: parse_secs("WEATHER_CACHE_TTL_SECS", non_empty("WEATHER_CACHE_TTL_SECS"))?
                .unwrap_or(defaults.cache_ttl),
            retry: defaults.retry,
        })
    }

    /// Returns a copy using `key` when it is non-blank.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.openweather_api_key = Some(key);
        }
        self
    }
}

fn parse_secs(var: &'static str, value: Option<String>) -> Result<Option<Duration>, ConfigError> {
    value
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidNumber { var, value: raw })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.openweather_api_key, None);
        assert_eq!(config.nws_api_base, NWS_API_BASE);
        assert_eq!(config.openweather_api_base, OPENWEATHER_API_BASE);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("OPENWEATHER_API_KEY", "abc123"),
            ("NWS_API_BASE", "http://localhost:8080"),
            ("WEATHER_REQUEST_TIMEOUT_SECS", "5"),
            ("WEATHER_CACHE_TTL_SECS", " 60 "),
        ]))
        .unwrap();

        assert_eq!(config.openweather_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.nws_api_base, "http://localhost:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn lowercase_key_is_a_fallback_and_blank_keys_are_ignored() {
        let config = Config::from_lookup(lookup(&[
            ("OPENWEATHER_API_KEY", "  "),
            ("openweather_api_key", "lower"),
        ]))
        .unwrap();
        assert_eq!(config.openweather_api_key.as_deref(), Some("lower"));
    }

    #[test]
    fn invalid_number_is_rejected() {
        let err = Config::from_lookup(lookup(&[("WEATHER_CACHE_TTL_SECS", "soon")])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("WEATHER_CACHE_TTL_SECS"));
        assert!(message.contains("soon"));
    }

    #[test]
    fn with_api_key_keeps_existing_key_when_blank() {
        let config = Config::default().with_api_key(Some("first".into()));
        let config = config.with_api_key(Some("".into()));
        assert_eq!(config.openweather_api_key.as_deref(), Some("first"));
        assert_eq!(config.with_api_key(None).openweather_api_key.as_deref(), Some("first"));
    }
}
