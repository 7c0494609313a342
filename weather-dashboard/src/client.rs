use std::fmt::Debug;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use weather_core::WeatherReading;

pub const DEFAULT_PROXY_URL: &str = "http://localhost:5000";

/// Why a dashboard fetch produced no reading.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The proxy could not be reached at all.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// A success response whose body still carried an `error` field.
    #[error("{0}")]
    Proxy(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

/// Where the dashboard gets its readings from.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, city: &str) -> Result<WeatherReading, FetchError>;
}

/// HTTP client for the weather proxy.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    base_url: String,
    http: Client,
}

impl ProxyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WeatherSource for ProxyClient {
    async fn fetch(&self, city: &str) -> Result<WeatherReading, FetchError> {
        let url = format!("{}/api/weather", self.base_url);
        // Cache buster, one per call.
        let t = Utc::now().timestamp_millis().to_string();

        let res = self
            .http
            .get(&url)
            .query(&[("city", city), ("t", t.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        let parsed: Option<Value> = serde_json::from_str(&body).ok();
        let error_field = parsed
            .as_ref()
            .and_then(|v| v.get("error"))
            .map(|e| e.as_str().map(str::to_string).unwrap_or_else(|| e.to_string()));

        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), message: error_field });
        }
        if let Some(message) = error_field {
            return Err(FetchError::Proxy(message));
        }

        let value = parsed.ok_or_else(|| FetchError::Decode("body is not JSON".into()))?;
        serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
