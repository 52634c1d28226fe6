//! Request validation
//!
//! `ValidatedJson` and `ValidatedQuery` deserialize a request body or query
//! string and run the `validator` rules declared on the target type.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Invalid query: {0}")]
    QueryError(#[from] QueryRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let detail = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string);
                    format!("{field}: {detail}")
                })
            })
            .collect();
        messages.sort();
        Self::ValidationFailed(messages.join("; "))
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::JsonError(e) => e.body_text(),
            Self::QueryError(e) => e.body_text(),
            Self::ValidationFailed(msg) => msg.clone(),
        };

        let body = serde_json::json!({
            "error": message,
            "code": "validation_error"
        });

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// A JSON extractor that also validates the request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// A query string extractor that also validates the parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        routing::{get, post},
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct CityParams {
        #[validate(length(min = 1, max = 20, message = "must be between 1 and 20 characters"))]
        city: String,
    }

    async fn json_handler(ValidatedJson(params): ValidatedJson<CityParams>) -> String {
        params.city
    }

    async fn query_handler(ValidatedQuery(params): ValidatedQuery<CityParams>) -> String {
        params.city
    }

    fn app() -> Router {
        Router::new()
            .route("/json", post(json_handler))
            .route("/query", get(query_handler))
    }

    async fn status_of(request: axum::http::Request<Body>) -> StatusCode {
        app().oneshot(request).await.unwrap().status()
    }

    fn post_json(body: &'static str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method("POST")
            .uri("/json")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn get_query(query: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(format!("/query{query}"))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn valid_json_passes() {
        assert_eq!(status_of(post_json(r#"{"city": "Paris"}"#)).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn too_long_json_field_rejected() {
        let status = status_of(post_json(r#"{"city": "Llanfairpwllgwyngyllgogery"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_rejected() {
        let status = status_of(post_json(r#"{"city": not json}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/json")
            .body(Body::from(r#"{"city": "Paris"}"#))
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn valid_query_passes() {
        assert_eq!(status_of(get_query("?city=Paris")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_query_parameter_rejected() {
        assert_eq!(status_of(get_query("")).await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_query_parameter_rejected() {
        assert_eq!(status_of(get_query("?city=")).await, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_messages_name_the_field() {
        let params = CityParams {
            city: String::new(),
        };
        let err = ValidationError::from(params.validate().unwrap_err());
        let ValidationError::ValidationFailed(msg) = err else {
            unreachable!("Expected ValidationFailed");
        };
        assert_eq!(msg, "city: must be between 1 and 20 characters");
    }
}
