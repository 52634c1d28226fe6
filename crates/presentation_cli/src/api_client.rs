//! Thin HTTP client for a running Skycast server

use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};
use tracing::debug;

/// Status and JSON body of a server response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Whether the server answered with a 2xx status
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// The `error` field of an error body, if present
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// Client for the Skycast HTTP API
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Create a client for the server at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /api/weather/current/`
    pub async fn current(&self, city: &str) -> anyhow::Result<ApiResponse> {
        let request = self
            .http
            .get(self.endpoint("/api/weather/current/"))
            .query(&[("city", city)]);
        Self::send(request).await
    }

    /// `GET /api/weather/forecast/`
    pub async fn forecast(&self, city: &str, date: &str) -> anyhow::Result<ApiResponse> {
        let request = self
            .http
            .get(self.endpoint("/api/weather/forecast/"))
            .query(&[("city", city), ("date", date)]);
        Self::send(request).await
    }

    /// `POST /api/weather/forecast/`
    pub async fn set_forecast(
        &self,
        city: &str,
        date: &str,
        min: f64,
        max: f64,
    ) -> anyhow::Result<ApiResponse> {
        let request = self
            .http
            .post(self.endpoint("/api/weather/forecast/"))
            .json(&json!({
                "city": city,
                "date": date,
                "min_temperature": min,
                "max_temperature": max,
            }));
        Self::send(request).await
    }

    /// `GET /ready`
    pub async fn ready(&self) -> anyhow::Result<ApiResponse> {
        Self::send(self.http.get(self.endpoint("/ready"))).await
    }

    async fn send(request: RequestBuilder) -> anyhow::Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!(status, "Server responded");

        // Non-JSON bodies (e.g. a proxy error page) are kept as a string
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Ok(ApiResponse { status, body })
    }
}
