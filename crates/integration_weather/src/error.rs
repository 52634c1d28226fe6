//! Weather client errors

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to a weather provider
#[derive(Debug, Error)]
pub enum WeatherError {
    /// City unknown to the provider, or no data for the requested date
    #[error("Not found: {0}")]
    NotFound(String),

    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// API key missing or rejected
    #[error("Unauthorized")]
    Unauthorized,
}

impl WeatherError {
    /// Map a non-success HTTP status to an error
    ///
    /// Returns `None` for 2xx statuses.
    #[must_use]
    pub fn from_status(status: StatusCode, what: &str) -> Option<Self> {
        if status.is_success() {
            return None;
        }
        let err = match status {
            StatusCode::NOT_FOUND => Self::NotFound(what.to_string()),
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            s if s.is_server_error() => Self::ServiceUnavailable(format!("HTTP {s}")),
            s => Self::RequestFailed(format!("HTTP {s}")),
        };
        Some(err)
    }

    /// Whether the error means the city or date is unknown
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        // Request URLs may carry an API key in the query string.
        let err = err.without_url();
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
