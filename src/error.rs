// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Failures of a single chat-completion round trip.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Upstream answered with something other than 200
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// 200 response without a usable first choice
    #[error("malformed upstream body: {0}")]
    MalformedBody(String),
}

/// Errors that end the telemetry publisher.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("mqtt client error: {0}")]
    Client(#[from] rumqttc::ClientError),

    #[error("mqtt connection error: {0}")]
    Connection(#[from] rumqttc::ConnectionError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bad_request_maps_to_400_with_error_field() {
        let response = AppError::BadRequest("No message provided".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "No message provided");
    }

    #[test]
    fn status_error_mentions_code_and_body() {
        let err = UpstreamError::Status {
            status: 401,
            body: "invalid api key".to_string(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[test]
    fn serde_error_converts_into_publish_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: PublishError = json_err.into();
        assert!(matches!(err, PublishError::Serialization(_)));
    }

    #[test]
    fn config_error_names_the_key() {
        let err = ConfigError::Invalid {
            key: "MQTT_BROKER_PORT".to_string(),
            value: "abc".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("MQTT_BROKER_PORT"));
        assert!(text.contains("\"abc\""));
    }
}
