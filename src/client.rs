//! Outbound HTTP adapter shared by every tool call.

use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::USER_AGENT;
use crate::error::FetchError;

#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Creates a client with the given per-request timeout
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        accept: Option<&str>,
    ) -> Result<T, FetchError> {
        let target = without_query(url);
        tracing::debug!(url = target, "Sending upstream request");

        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let response = request.send().await.map_err(|e| {
            let err = FetchError::from(e.without_url());
            tracing::error!(url = target, error = %err, "Upstream request failed");
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(url = target, status = status.as_u16(), "HTTP error occurred");
            return Err(FetchError::HttpStatus {
                code: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| {
            let err = if e.is_timeout() {
                FetchError::Transport(e.without_url().to_string())
            } else {
                FetchError::Unknown(e.without_url().to_string())
            };
            tracing::error!(url = target, error = %err, "Unreadable upstream response");
            err
        })
    }
}

/// Strips the query string, which may carry an API key.
fn without_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_stripped_for_logging() {
        assert_eq!(
            without_query("https://example.test/weather?lat=1&appid=secret"),
            "https://example.test/weather"
        );
        assert_eq!(
            without_query("https://example.test/alerts"),
            "https://example.test/alerts"
        );
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpClient::new(Duration::from_secs(5)).unwrap();
        let result = client
            .fetch_json::<serde_json::Value>(&format!("http://{addr}/alerts"), None)
            .await;

        assert!(matches!(result, Err(FetchError::Transport(_))), "{result:?}");
    }
}
