use crate::app_config::AppConfig;
use reqwest::{Client, RequestBuilder, header};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

/// HTTP access to the device cloud. Every call is bounded by the configured timeout and is never retried.
#[derive(Debug, Clone)]
pub struct ParticleClient {
    client: Client,
    config: Arc<AppConfig>,
}

impl ParticleClient {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, ParticleClientError> {
        let client = Client::builder().build()?;
        Ok(ParticleClient { client, config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Fetches `path` and resolves with the raw body, whatever its status or content.
    #[instrument(skip(self, access_token))]
    pub async fn get(&self, path: &str, access_token: &str) -> Result<String, ParticleClientError> {
        let request = self
            .client
            .get(self.url(path))
            .header(header::ACCEPT, "*/*")
            .query(&[("access_token", access_token)]);

        let (status, body) = self.send(request, self.config.particle().get_timeout()).await?;
        debug!(status = %status, "GET {}... OK, {} byte(s)", path, body.len());
        Ok(body)
    }

    /// Posts `params` as a form and resolves with the `return_value` of the JSON response.
    #[instrument(skip(self, params))]
    pub async fn post(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, ParticleClientError> {
        let request = self.client.post(self.url(path)).form(params);

        let (status, body) = self.send(request, self.config.particle().post_timeout()).await?;
        debug!(status = %status, "POST {}... OK", path);

        let response = serde_json::from_str::<PostResponse>(&body).map_err(|e| {
            warn!(status = %status, "⚠️ Unable to parse the response of POST {}: {}", path, e);
            ParticleClientError::MalformedResponse(format!("{}: {}", e, body))
        })?;

        response
            .return_value
            .ok_or_else(|| ParticleClientError::MalformedResponse(format!("missing 'return_value': {}", body)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.particle().url(), path)
    }

    // Dropping the request future on expiry aborts the connection it holds.
    async fn send(&self, request: RequestBuilder, limit: Duration) -> Result<(reqwest::StatusCode, String), ParticleClientError> {
        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        match timeout(limit, exchange).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!("⏳ No response within {} ms, aborting the request", limit.as_millis());
                Err(ParticleClientError::Timeout(limit))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostResponse {
    // `null` counts as present, only an absent key is malformed
    #[serde(default, deserialize_with = "present")]
    return_value: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Error, Debug)]
pub enum ParticleClientError {
    #[error("no response within {} ms", .0.as_millis())]
    Timeout(Duration),
    #[error("request error: {0}")]
    Transport(reqwest::Error),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

// The request URL carries the access token in its query
impl From<reqwest::Error> for ParticleClientError {
    fn from(error: reqwest::Error) -> Self {
        ParticleClientError::Transport(error.without_url())
    }
}
