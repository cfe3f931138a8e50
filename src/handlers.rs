//! Tool handlers backed by the NWS and OpenWeatherMap APIs.

use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;

use crate::cache::TimedCache;
use crate::client::HttpClient;
use crate::config::Config;
use crate::constants::{API_KEY_MISSING, GEO_JSON, SERVICE_UNAVAILABLE};
use crate::error::{FetchError, ToolError};
use crate::formatters::{format_alerts, format_current_conditions};
use crate::retry::with_retry;

/// Per-invocation settings supplied by the transport.
#[derive(Debug, Clone, Default)]
pub struct RequestScope {
    /// Takes precedence over the configured key.
    pub api_key: Option<String>,
}

/// Shared state for the weather tools. Cheap to clone.
#[derive(Clone)]
pub struct WeatherApi {
    http: HttpClient,
    cache: Arc<TimedCache>,
    config: Arc<Config>,
}

impl WeatherApi {
    pub fn new(config: Config) -> reqwest::Result<Self> {
        Ok(Self {
            http: HttpClient::new(config.request_timeout)?,
            cache: Arc::new(TimedCache::new(config.cache_ttl)),
            config: Arc::new(config),
        })
    }

    pub fn cache(&self) -> &TimedCache {
        &self.cache
    }

    /// Active alerts for a US state.
    pub async fn get_alerts(&self, state: &str) -> Result<String, ToolError> {
        let state = state.trim().to_ascii_uppercase();
        let cache_key = format!("alerts:{state}");

        if let Some(payload) = self.cache.get(&cache_key) {
            tracing::debug!(state = %state, "Serving alerts from cache");
            return Ok(format_alerts(Some(&payload)));
        }

        let url = format!("{}/alerts/active/area/{}", self.config.nws_api_base, state);
        let fetched = with_retry(&self.config.retry, || {
            self.http.fetch_json::<Value>(&url, Some(GEO_JSON))
        })
        .await;

        let payload = match fetched {
            Ok(payload) => {
                self.cache.set(cache_key, payload.clone());
                Some(payload)
            }
            Err(e) => {
                tracing::error!(state = %state, error = %e, "No alert data available");
                None
            }
        };

        Ok(format_alerts(payload.as_ref()))
    }

    /// Current conditions at a point. Coordinates are assumed validated.
    pub async fn get_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        scope: &RequestScope,
    ) -> Result<String, ToolError> {
        let Some(api_key) = scope
            .api_key
            .as_deref()
            .or(self.config.openweather_api_key.as_deref())
        else {
            tracing::warn!("OpenWeather API key is not configured");
            return Ok(API_KEY_MISSING.to_string());
        };

        let cache_key = format!("current:{latitude},{longitude}");
        if let Some(payload) = self.cache.get(&cache_key) {
            tracing::debug!(latitude, longitude, "Serving current conditions from cache");
            return Ok(format_current_conditions(&payload));
        }

        let url = Url::parse_with_params(
            &format!("{}/weather", self.config.openweather_api_base),
            &[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ],
        )
        .map_err(|e| ToolError::Handler(format!("invalid OpenWeather URL: {e}")))?;

        match self.http.fetch_json::<Value>(url.as_str(), None).await {
            Ok(payload) => {
                let text = format_current_conditions(&payload);
                self.cache.set(cache_key, payload);
                Ok(text)
            }
            Err(FetchError::HttpStatus { code }) => {
                tracing::error!(code, "OpenWeather API HTTP error");
                Ok(format!("Weather service error: {code}"))
            }
            Err(e) => {
                tracing::error!(error = %e, "OpenWeather API request failed");
                Ok(SERVICE_UNAVAILABLE.to_string())
            }
        }
    }
}
